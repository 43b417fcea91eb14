//! Benchmarks for template execution.

use std::hint::black_box;
use std::io::Write;

use bt_template::{DirectiveDefinition, Template, builtin, fetch_fn};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const VALUE: &[u8] = b"Sergey";

fn bench_directive(c: &mut Criterion) {
    let input = b"/api/user/{{ customDirective .Name }}";
    let template = Template::new([DirectiveDefinition::new("customDirective", |out, arg| {
        out.write_all(arg)?;
        Ok(())
    })]);
    let mut out = Vec::new();
    let mut scratch = Vec::new();

    let mut group = c.benchmark_group("execute");
    group.throughput(Throughput::Bytes((input.len() + VALUE.len()) as u64));
    group.bench_function("directive", |b| {
        b.iter(|| {
            out.clear();
            template
                .execute_with_buffer(
                    &mut out,
                    black_box(input),
                    fetch_fn(|w, _path| {
                        w.write_all(VALUE)?;
                        Ok(())
                    }),
                    &mut scratch,
                )
                .unwrap()
        });
    });
    group.finish();
}

fn bench_placeholder_count(c: &mut Criterion) {
    let template = Template::new(builtin::all());
    let mut group = c.benchmark_group("execute_by_placeholders");

    for count in [1, 10, 100] {
        let input = "/segment/{{ .id }}/{{ toLower .Name }}".repeat(count);
        let mut out = Vec::with_capacity(input.len());

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| {
                out.clear();
                template
                    .execute(
                        &mut out,
                        input.as_bytes(),
                        fetch_fn(|w, _path| {
                            w.write_all(VALUE)?;
                            Ok(())
                        }),
                    )
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_literal_only(c: &mut Criterion) {
    let template = Template::builder().build();
    let input = "/static/assets/{app}.css?v=2 ".repeat(64);
    let mut out = Vec::with_capacity(input.len());

    c.bench_function("execute_literal_only", |b| {
        b.iter(|| {
            out.clear();
            template
                .execute(
                    &mut out,
                    black_box(input.as_bytes()),
                    fetch_fn(|_w, _path| Ok(())),
                )
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_directive,
    bench_placeholder_count,
    bench_literal_only
);
criterion_main!(benches);
