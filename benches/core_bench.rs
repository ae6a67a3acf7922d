use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use schaltplan_editor::core::{DESC_AND, DESC_IN};
use schaltplan_editor::{Circuit, RecordingRenderer, Theme};
use schaltplan_editor::view::{layout_component, route_nets, View};
use std::hint::black_box;

/// Baut ein Gitter aus AND-Gattern, deren Eingänge von IN-Pins gespeist
/// werden; jedes Gatter hängt mit beiden Quellen an einem Drei-Punkt-Netz.
fn build_synthetic_circuit(gate_count: usize) -> Circuit {
    let mut circuit = Circuit::new();
    let theme = Theme::default();
    let renderer = RecordingRenderer::new();

    for index in 0..gate_count {
        let column = (index % 100) as f32;
        let row = (index / 100) as f32;
        let origin = Vec2::new(column * 120.0, row * 120.0);

        let gate = circuit.add_component(DESC_AND, origin);
        let source_a = circuit.add_component(DESC_IN, origin + Vec2::new(-90.0, -20.0));
        let source_b = circuit.add_component(DESC_IN, origin + Vec2::new(-90.0, 20.0));

        let gate_in: Vec<_> = circuit.ports_of(gate).map(|(k, _)| k).collect();
        let a_out = circuit.ports_of(source_a).map(|(k, _)| k).next().unwrap();
        let b_out = circuit.ports_of(source_b).map(|(k, _)| k).next().unwrap();

        let net = circuit.add_net();
        circuit.add_endpoint(net, a_out).unwrap();
        circuit.add_endpoint(net, b_out).unwrap();
        circuit.add_endpoint(net, gate_in[0]).unwrap();
    }

    // Events abarbeiten, damit alle Bauteile ihr Layout haben
    let mut view = View::new();
    view.sync(&mut circuit, &theme, &renderer);

    circuit
}

fn bench_layout(c: &mut Criterion) {
    let mut circuit = Circuit::new();
    let keys: Vec<_> = (0..64)
        .map(|i| circuit.add_component(DESC_AND, Vec2::new(i as f32 * 80.0, 0.0)))
        .collect();
    circuit.drain_events();
    let theme = Theme::default();
    let renderer = RecordingRenderer::new();

    c.bench_function("layout_64_components", |b| {
        b.iter(|| {
            for key in &keys {
                layout_component(&mut circuit, &theme, &renderer, black_box(*key));
            }
        })
    });
}

fn bench_hover_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("hover_query");

    for &gate_count in &[100usize, 1_000usize] {
        let circuit = build_synthetic_circuit(gate_count);
        let theme = Theme::default();
        let mut view = View::new();

        let query_points: Vec<Vec2> = (0..256)
            .map(|i| {
                let x = ((i * 37) % 1000) as f32 * 12.0;
                let y = ((i * 7) % 100) as f32 * 12.0;
                Vec2::new(x, y)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("update_hover_batch", gate_count),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for point in &query_points {
                        view.update_hover(circuit, &theme, black_box(*point));
                        if view.hovered_item.is_some() {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                })
            },
        );
    }

    group.finish();
}

fn bench_wire_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire_routing");

    for &gate_count in &[100usize, 1_000usize] {
        let mut circuit = build_synthetic_circuit(gate_count);
        let mut wires = Vec::new();
        let mut vertices = Vec::new();

        group.bench_function(BenchmarkId::new("route_nets", gate_count), |b| {
            b.iter(|| {
                route_nets(&mut circuit, &mut wires, &mut vertices);
                black_box(wires.len())
            })
        });
    }

    group.finish();
}

criterion_group!(core_benches, bench_layout, bench_hover_query, bench_wire_routing);
criterion_main!(core_benches);
