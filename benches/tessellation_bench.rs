//! Benchmarks for CPU patch tessellation.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessview::camera::OrbitCamera;
use tessview::frame::FrameComposer;
use tessview::mesh::PatchMesh;
use tessview::options::Options;
use tessview::tessellation::{
    tessellate, PatchTessellator, TessellationMode, TessellationStore,
};

fn tessellate_benchmark(c: &mut Criterion) {
    let mesh = PatchMesh::builtin();
    let mut group = c.benchmark_group("tessellate_builtin");

    for n in [1_u32, 8, 32, 64] {
        let resolutions = vec![n; mesh.patch_count()];
        let _ = group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(tessellate(black_box(&mesh), &resolutions)));
        });
    }

    group.finish();
}

fn update_benchmark(c: &mut Criterion) {
    let options = Options::default();
    let mesh = PatchMesh::builtin();
    let camera = OrbitCamera::from_options(&options.camera);
    let composer = FrameComposer::new(&mesh.bounds());
    let mut group = c.benchmark_group("tessellator_update");

    for mode in TessellationMode::ALL {
        let mut store = TessellationStore::from_options(&options.tessellation);
        store.select(mode);
        let frame = composer.compose(&camera, &mut store, (800, 600));
        let level_frame = frame.level_frame();

        // Invalidate every iteration so each one pays for a full rebuild.
        let _ = group.bench_function(mode.name(), |b| {
            let mut tessellator = PatchTessellator::new();
            b.iter(|| {
                tessellator.invalidate();
                black_box(tessellator.update(
                    &mesh,
                    frame.mode,
                    frame.terms,
                    &level_frame,
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, tessellate_benchmark, update_benchmark);
criterion_main!(benches);
