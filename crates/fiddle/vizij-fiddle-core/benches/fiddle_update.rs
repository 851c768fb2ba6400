use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vizij_fiddle::{parse_snippet_block, AcceptAll, Fiddle, FiddleConfig, PlayerPool, SurfaceId};

const BLOCK: &str = "// snippet Circle\n\
import {makeScene2D, Circle} from '@motion-canvas/2d';\n\
export default makeScene2D(function* (view) {\n\
  view.add(<Circle size={160} fill={'#e13238'} />);\n\
});\n\
// snippet Square\n\
import {makeScene2D, Rect} from '@motion-canvas/2d';\n\
export default makeScene2D(function* (view) {\n\
  view.add(<Rect size={160} fill={'#68abdf'} />);\n\
});\n";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_snippet_block", |b| {
        b.iter(|| parse_snippet_block(black_box(BLOCK)))
    });
}

fn bench_edit_update_cycle(c: &mut Criterion) {
    let mut pool = PlayerPool::default();
    let mut widget = Fiddle::new(BLOCK, SurfaceId::new("bench"), FiddleConfig::default());
    widget.mount(&mut pool, &mut AcceptAll);

    let mut tick = 0u64;
    c.bench_function("edit_update_cycle", |b| {
        b.iter(|| {
            tick += 1;
            widget.on_edit(format!("{BLOCK}\n// edit {tick}"));
            widget.update(&mut pool, &mut AcceptAll);
            widget.take_effects();
        })
    });
}

criterion_group!(benches, bench_parse, bench_edit_update_cycle);
criterion_main!(benches);
