use criterion::{Criterion, black_box, criterion_group, criterion_main};

use glrender::{
    BindingStateCache, BufferData, BufferHandle, BufferPayload, BufferTarget, DrawDispatcher,
    DrawMode, DummyContext, EnumTranslator, Renderer, RendererParameters,
};

// ---------------------------------------------------------------------------
// Binding cache
// ---------------------------------------------------------------------------

fn bench_bind_hit(c: &mut Criterion) {
    let translator = EnumTranslator::default();
    let buffer = Some(BufferHandle::from_raw(1));

    c.bench_function("bind_cache_hit", |b| {
        let mut context = DummyContext::new();
        let mut cache = BindingStateCache::new();
        cache.bind(&mut context, &translator, buffer, BufferTarget::ArrayBuffer);
        b.iter(|| {
            black_box(cache.bind(
                &mut context,
                &translator,
                black_box(buffer),
                BufferTarget::ArrayBuffer,
            ));
        });
    });
}

fn bench_bind_miss(c: &mut Criterion) {
    let translator = EnumTranslator::default();
    let buffers = [
        Some(BufferHandle::from_raw(1)),
        Some(BufferHandle::from_raw(2)),
    ];

    c.bench_function("bind_cache_miss_alternating", |b| {
        let mut context = DummyContext::new();
        let mut cache = BindingStateCache::new();
        let mut i = 0;
        b.iter(|| {
            i ^= 1;
            black_box(cache.bind(
                &mut context,
                &translator,
                buffers[i],
                BufferTarget::ArrayBuffer,
            ));
            // Keep the recorded call log from growing without bound.
            context.clear_calls();
        });
    });
}

// ---------------------------------------------------------------------------
// Buffer resolution and draw dispatch
// ---------------------------------------------------------------------------

fn bench_resolve_clean(c: &mut Criterion) {
    c.bench_function("resolve_clean_buffer", |b| {
        let mut renderer = Renderer::offscreen(RendererParameters::default(), DummyContext::new())
            .expect("dummy context");
        let mut data = BufferData::new(vec![0.0f32; 3 * 1024]);
        renderer.bind_data(&mut data).expect("buffer creation");
        b.iter(|| {
            black_box(renderer.bind_data(&mut data).expect("bind"));
        });
    });
}

fn bench_draw_submeshes(c: &mut Criterion) {
    let translator = EnumTranslator::default();
    let indices = BufferPayload::U16(vec![0; 64 * 6]);
    let counts = vec![6u32; 64];
    let modes = [DrawMode::Triangles, DrawMode::Lines];

    c.bench_function("draw_indexed_64_submeshes", |b| {
        let mut context = DummyContext::new();
        let dispatcher = DrawDispatcher::new();
        b.iter(|| {
            black_box(
                dispatcher
                    .draw_indexed(&mut context, &translator, &indices, &modes, &counts)
                    .expect("draw"),
            );
            context.clear_calls();
        });
    });
}

criterion_group!(
    benches,
    bench_bind_hit,
    bench_bind_miss,
    bench_resolve_clean,
    bench_draw_submeshes,
);
criterion_main!(benches);
