/// Benchmark suite for the voxel store
/// Insertion, neighborhood queries and the per-voxel draw path.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{IVec2, IVec3, Vec3};
use polyraster::{Framebuffer, Renderer, VoxelConfig, VoxelStore};

fn bench_terrain_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_terrain");
    for half in [8, 16, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(half * 2), &half, |b, &half| {
            b.iter(|| {
                let mut store = VoxelStore::default();
                black_box(store.generate_terrain(IVec2::splat(-half), IVec2::splat(half), 12345))
            });
        });
    }
    group.finish();
}

fn bench_add_remove(c: &mut Criterion) {
    c.bench_function("voxel_add_remove", |b| {
        let mut store = VoxelStore::default();
        b.iter(|| {
            for i in 0..1000 {
                store.add_voxel(IVec3::new(i % 37 - 18, i % 11, i / 37), 0xFFFF_FFFF);
            }
            for i in 0..1000 {
                black_box(store.remove_voxel(IVec3::new(i % 37 - 18, i % 11, i / 37)));
            }
        });
    });
}

fn bench_visible_chunk_keys(c: &mut Criterion) {
    let mut store = VoxelStore::new(VoxelConfig {
        chunk_size: 4,
        ..Default::default()
    });
    store.generate_terrain(IVec2::splat(-32), IVec2::splat(32), 7);

    let mut group = c.benchmark_group("visible_chunk_keys");
    for distance in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(distance), &distance, |b, &d| {
            b.iter(|| black_box(store.visible_chunk_keys(black_box(Vec3::ZERO), d)));
        });
    }
    group.finish();
}

fn bench_draw_visible_chunks(c: &mut Criterion) {
    c.bench_function("draw_visible_chunks", |b| {
        let mut store = VoxelStore::default();
        store.generate_terrain(IVec2::splat(-6), IVec2::splat(6), 12345);
        let mut renderer = Renderer::default();
        let mut framebuffer = Framebuffer::new(640, 480);

        b.iter(|| {
            framebuffer.clear(0xFF10_1018);
            renderer.step_rotation();
            black_box(store.draw_visible_chunks(&mut renderer, Vec3::ZERO, &mut framebuffer))
        });
    });
}

criterion_group!(
    benches,
    bench_terrain_generation,
    bench_add_remove,
    bench_visible_chunk_keys,
    bench_draw_visible_chunks,
);
criterion_main!(benches);
