mod common;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use py2c::Config;
use py2c::transpiler::Transpiler;

fn bench_transpiler(c: &mut Criterion) {
    for (label, path) in common::WORKLOADS {
        let program = common::load_program(path);
        c.bench_function(&format!("transpiler_emit_only_{label}"), |b| {
            b.iter(|| {
                let source = Transpiler
                    .transpile(black_box(&program))
                    .expect("transpile");
                black_box(source);
            })
        });

        let source = common::load_source(path);
        let config = Config::default();
        c.bench_function(&format!("transpiler_total_{label}"), |b| {
            b.iter(|| {
                let output =
                    py2c::translate_source(black_box(&source), &config).expect("translate");
                black_box(output);
            })
        });
    }
}

criterion_group!(benches, bench_transpiler);
criterion_main!(benches);
