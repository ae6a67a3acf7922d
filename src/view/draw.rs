//! Zeichen-Traversierung: View-Zustand → Renderer-Primitive.
//!
//! Liest Schaltplan und View strikt lesend und reiht Primitive-Aufrufe
//! in Zeichen-Reihenfolge auf: Auswahlrechteck, Bauteile mit Labels und
//! Ports, danach pro Netz die Leitungszüge und Wegpunkte. Selektion und
//! Hover kommen als Flags aus den View-Mengen, nie aus den Entities.

use flagset::FlagSet;
use glam::Vec2;

use crate::core::{descriptor, Circuit, EntityId, PortDirection, SymbolShape};
use crate::render::{DrawFlag, HAlign, LabelKind, Renderer, VAlign};
use crate::shared::Theme;

use super::View;

/// Zeichnet den kompletten View-Zustand.
///
/// Typ-, Namens- und Port-Labels erscheinen nur bei Default-Formen;
/// Gatter-Formen zeichnen allein ihr Symbol, dessen Höhe auf 5/3 der
/// Box-Höhe korrigiert wird, weil die Form selbst nur 3/5 davon füllt.
pub fn draw_view(view: &View, circuit: &Circuit, theme: &Theme, renderer: &mut dyn Renderer) {
    if view.selection_box.half_size.x > 0.001 && view.selection_box.half_size.y > 0.001 {
        renderer.draw_selection_box(view.selection_box, FlagSet::default());
    }

    let pad = theme.label_padding;

    for (component_key, component) in circuit.components() {
        let mut flags: FlagSet<DrawFlag> = FlagSet::default();
        if view.is_selected(EntityId::Component(component_key)) {
            flags |= DrawFlag::Selected;
        }
        if view.is_hovered(EntityId::Component(component_key)) {
            flags |= DrawFlag::Hovered;
        }

        let shape = descriptor(component.desc).shape;
        let mut bounds = component.bounds;
        if shape != SymbolShape::Default {
            bounds.half_size.y = bounds.half_size.y * 5.0 / 3.0;
        }
        renderer.draw_symbol(bounds, shape, flags);

        if shape == SymbolShape::Default {
            if let Some(label) = circuit.label(component.type_label) {
                renderer.draw_label(
                    label.bounds.translated(component.bounds.center),
                    &label.text,
                    LabelKind::Type,
                    FlagSet::default(),
                );
            }
            if let Some(label) = circuit.label(component.name_label) {
                renderer.draw_label(
                    label.bounds.translated(component.bounds.center),
                    &label.text,
                    LabelKind::Name,
                    FlagSet::default(),
                );
            }
        }

        for (port_key, port) in circuit.ports_of(component_key) {
            let port_pos = component.bounds.center + port.position;
            let mut port_flags: FlagSet<DrawFlag> = FlagSet::default();
            if view.is_hovered(EntityId::Port(port_key)) {
                port_flags |= DrawFlag::Hovered;
            }
            renderer.draw_port(port_pos, port_flags);

            if shape == SymbolShape::Default {
                if let Some(label) = circuit.label(port.label) {
                    let (anchor, halign) = match port.direction {
                        PortDirection::In => (
                            Vec2::new(pad * 2.0 + theme.port_width / 2.0, 0.0),
                            HAlign::Left,
                        ),
                        PortDirection::Out => (
                            Vec2::new(-pad - theme.port_width / 2.0, 0.0),
                            HAlign::Right,
                        ),
                    };
                    let label_bounds = renderer.text_bounds(
                        anchor,
                        &label.text,
                        halign,
                        VAlign::Middle,
                        theme.label_font_size,
                    );
                    renderer.draw_label(
                        label_bounds.translated(port_pos),
                        &label.text,
                        LabelKind::Port,
                        port_flags,
                    );
                }
            }
        }
    }

    for (net_key, net) in circuit.nets() {
        let net_hovered = view.is_hovered(EntityId::Net(net_key));

        let mut cursor = net.vertex_offset as usize;
        let wire_range = net.wire_offset as usize..;
        for wire in view
            .wires
            .get(wire_range)
            .unwrap_or(&[])
            .iter()
            .take(net.wire_count as usize)
        {
            let count = wire.vertex_count();
            let Some(vertices) = view.vertices.get(cursor..cursor + count) else {
                break;
            };
            cursor += count;

            let mut flags: FlagSet<DrawFlag> = FlagSet::default();
            if view.debug_mode && wire.is_root() {
                flags |= DrawFlag::Debug;
            }
            if net_hovered {
                flags |= DrawFlag::Hovered;
            }

            renderer.draw_wire(vertices, flags);
            if wire.ends_in_junction() {
                if let Some(last) = vertices.last() {
                    renderer.draw_junction(*last, flags);
                }
            }
        }

        for (waypoint_key, waypoint) in circuit.waypoints_of(net_key) {
            let mut flags: FlagSet<DrawFlag> = FlagSet::default();
            if view.is_selected(EntityId::Waypoint(waypoint_key)) {
                flags |= DrawFlag::Selected;
            }
            if view.is_hovered(EntityId::Waypoint(waypoint_key)) {
                flags |= DrawFlag::Hovered;
            }
            renderer.draw_waypoint(waypoint.position, flags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Box2, DESC_AND, DESC_IN};
    use crate::render::{DrawCall, RecordingRenderer};
    use approx::assert_relative_eq;

    fn fixture(desc: crate::core::DescriptorId) -> (Circuit, View, Theme) {
        let mut circuit = Circuit::new();
        circuit.add_component(desc, Vec2::ZERO);
        let theme = Theme::default();
        let renderer = RecordingRenderer::new();
        let mut view = View::new();
        view.sync(&mut circuit, &theme, &renderer);
        view.route(&mut circuit);
        (circuit, view, theme)
    }

    #[test]
    fn test_default_shape_draws_all_labels() {
        let (circuit, view, theme) = fixture(DESC_IN);
        let mut renderer = RecordingRenderer::new();
        draw_view(&view, &circuit, &theme, &mut renderer);

        let labels = renderer.count_matching(|c| matches!(c, DrawCall::Label { .. }));
        // Typ + Name + ein Port-Label
        assert_eq!(labels, 3);
        assert_eq!(renderer.count_matching(|c| matches!(c, DrawCall::Port { .. })), 1);
        assert_eq!(renderer.count_matching(|c| matches!(c, DrawCall::Symbol { .. })), 1);
    }

    #[test]
    fn test_gate_shape_suppresses_labels_and_stretches_box() {
        let (circuit, view, theme) = fixture(DESC_AND);
        let mut renderer = RecordingRenderer::new();
        draw_view(&view, &circuit, &theme, &mut renderer);

        assert_eq!(renderer.count_matching(|c| matches!(c, DrawCall::Label { .. })), 0);
        // Ports werden trotzdem gezeichnet
        assert_eq!(renderer.count_matching(|c| matches!(c, DrawCall::Port { .. })), 3);

        let symbol_bounds = renderer
            .calls
            .iter()
            .find_map(|c| match c {
                DrawCall::Symbol { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .expect("Symbol-Aufruf");
        // Box-Halbhöhe 30 → gezeichnet mit 50
        assert_relative_eq!(symbol_bounds.half_size.y, 50.0);
    }

    #[test]
    fn test_selection_box_needs_area_in_both_axes() {
        let (circuit, mut view, theme) = fixture(DESC_IN);

        let mut renderer = RecordingRenderer::new();
        draw_view(&view, &circuit, &theme, &mut renderer);
        assert_eq!(renderer.count_matching(|c| matches!(c, DrawCall::SelectionBox { .. })), 0);

        // Entartetes Rechteck (nur x-Ausdehnung) wird nicht gezeichnet
        view.selection_box = Box2::new(Vec2::ZERO, Vec2::new(10.0, 0.0));
        renderer.clear();
        draw_view(&view, &circuit, &theme, &mut renderer);
        assert_eq!(renderer.count_matching(|c| matches!(c, DrawCall::SelectionBox { .. })), 0);

        view.selection_box = Box2::new(Vec2::ZERO, Vec2::new(10.0, 8.0));
        renderer.clear();
        draw_view(&view, &circuit, &theme, &mut renderer);
        assert_eq!(renderer.count_matching(|c| matches!(c, DrawCall::SelectionBox { .. })), 1);
    }

    #[test]
    fn test_debug_flag_only_on_root_wires_in_debug_mode() {
        let mut circuit = Circuit::new();
        let a = circuit.add_component(DESC_IN, Vec2::new(0.0, 0.0));
        let b = circuit.add_component(DESC_IN, Vec2::new(100.0, 0.0));
        let from = circuit.ports_of(a).map(|(k, _)| k).next().expect("Port");
        let to = circuit.ports_of(b).map(|(k, _)| k).next().expect("Port");
        let net = circuit.add_net();
        circuit.add_endpoint(net, from).expect("Endpunkt");
        circuit.add_endpoint(net, to).expect("Endpunkt");

        let theme = Theme::default();
        let probe = RecordingRenderer::new();
        let mut view = View::new();
        view.sync(&mut circuit, &theme, &probe);
        view.route(&mut circuit);

        let mut renderer = RecordingRenderer::new();
        draw_view(&view, &circuit, &theme, &mut renderer);
        let plain = renderer.count_matching(|c| {
            matches!(c, DrawCall::Wire { flags, .. } if flags.contains(DrawFlag::Debug))
        });
        assert_eq!(plain, 0);

        view.debug_mode = true;
        renderer.clear();
        draw_view(&view, &circuit, &theme, &mut renderer);
        let debug = renderer.count_matching(|c| {
            matches!(c, DrawCall::Wire { flags, .. } if flags.contains(DrawFlag::Debug))
        });
        assert_eq!(debug, 1);
    }

    #[test]
    fn test_junction_drawn_at_last_wire_vertex() {
        let mut circuit = Circuit::new();
        let a = circuit.add_component(DESC_IN, Vec2::new(0.0, 0.0));
        let b = circuit.add_component(DESC_IN, Vec2::new(100.0, 0.0));
        let from = circuit.ports_of(a).map(|(k, _)| k).next().expect("Port");
        let to = circuit.ports_of(b).map(|(k, _)| k).next().expect("Port");
        let net = circuit.add_net();
        circuit.add_endpoint(net, from).expect("Endpunkt");
        circuit.add_endpoint(net, to).expect("Endpunkt");

        let theme = Theme::default();
        let probe = RecordingRenderer::new();
        let mut view = View::new();
        view.sync(&mut circuit, &theme, &probe);
        view.route(&mut circuit);
        if let Some(wire) = view.wires.first_mut() {
            wire.mark_junction();
        }

        let mut renderer = RecordingRenderer::new();
        draw_view(&view, &circuit, &theme, &mut renderer);

        let junction = renderer
            .calls
            .iter()
            .find_map(|c| match c {
                DrawCall::Junction { pos, .. } => Some(*pos),
                _ => None,
            })
            .expect("Junction-Aufruf");
        // Letzter Vertex des Zugs = Welt-Position des zweiten Ports
        let expected = circuit.port_world_position(to).expect("Port-Position");
        assert_relative_eq!(junction.x, expected.x);
        assert_relative_eq!(junction.y, expected.y);
    }

    #[test]
    fn test_waypoints_carry_selection_and_hover_flags() {
        let mut circuit = Circuit::new();
        let net = circuit.add_net();
        let selected = circuit.add_waypoint(net, Vec2::new(0.0, 0.0)).expect("Wegpunkt");
        circuit.add_waypoint(net, Vec2::new(50.0, 0.0)).expect("Wegpunkt");

        let theme = Theme::default();
        let probe = RecordingRenderer::new();
        let mut view = View::new();
        view.sync(&mut circuit, &theme, &probe);
        view.route(&mut circuit);
        view.select_item(EntityId::Waypoint(selected));

        let mut renderer = RecordingRenderer::new();
        draw_view(&view, &circuit, &theme, &mut renderer);

        let flagged = renderer.count_matching(|c| {
            matches!(c, DrawCall::Waypoint { flags, .. } if flags.contains(DrawFlag::Selected))
        });
        let total = renderer.count_matching(|c| matches!(c, DrawCall::Waypoint { .. }));
        assert_eq!(flagged, 1);
        assert_eq!(total, 2);
    }
}
