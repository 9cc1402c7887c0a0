use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examkit_core::codec::{decode, encode};
use examkit_core::directory::Roster;
use examkit_core::model::{Exam, Question, Student, Teacher};
use examkit_core::results::ResultStore;

fn make_roster(exams: usize, questions: usize, students: usize) -> Roster {
    let exams = (0..exams)
        .map(|e| {
            let questions = (0..questions)
                .map(|q| match q % 3 {
                    0 => Question::multiple_choice(
                        format!("Question {q}"),
                        2.0,
                        0.5,
                        ["a".into(), "b".into(), "c".into(), "d".into()],
                        q % 4,
                    )
                    .unwrap(),
                    1 => Question::short_answer(format!("Question {q}"), 1.0, 0.25, "42").unwrap(),
                    _ => Question::descriptive(format!("Question {q}"), 5.0, "reference").unwrap(),
                })
                .collect();
            Exam::new(format!("EX{e}"), questions)
        })
        .collect();

    Roster {
        teachers: vec![Teacher {
            name: "Bench Teacher".into(),
            id: "t0".into(),
            password: "pw".into(),
            courses: vec!["Benchmarks".into()],
            exams,
        }],
        students: (0..students)
            .map(|s| Student {
                name: format!("Student {s}"),
                id: format!("s{s}"),
                password: "pw".into(),
                major: "CS".into(),
                registered_exams: vec!["EX0".into()],
            })
            .collect(),
    }
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let small = make_roster(2, 10, 20);
    let large = make_roster(50, 40, 1_000);
    let small_text = encode(&small);
    let large_text = encode(&large);

    group.bench_function("encode_small", |b| b.iter(|| encode(black_box(&small))));
    group.bench_function("encode_large", |b| b.iter(|| encode(black_box(&large))));
    group.bench_function("decode_small", |b| b.iter(|| decode(black_box(&small_text))));
    group.bench_function("decode_large", |b| b.iter(|| decode(black_box(&large_text))));

    group.finish();
}

fn bench_result_log(c: &mut Criterion) {
    let log: String = (0..10_000)
        .map(|i| format!("EX{},s{},{}\n", i % 20, i, (i % 41) as f64 * 0.25))
        .collect();

    c.bench_function("parse_result_log_10k", |b| {
        b.iter(|| ResultStore::parse(black_box(&log)))
    });
}

criterion_group!(benches, bench_codec, bench_result_log);
criterion_main!(benches);
