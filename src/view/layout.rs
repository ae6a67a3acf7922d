//! Bauteil-Layout: Größe, Port-Positionen und Label-Boxen.
//!
//! Läuft einmal pro Bauteil, wenn der View-Layer einen
//! `ComponentAdded`-Event abarbeitet. Die Text-Messung kommt über die
//! [`Renderer`]-Schnittstelle, damit das Layout ohne Fenster testbar ist.

use glam::Vec2;

use crate::core::{descriptor, Circuit, ComponentKey, PortDirection, SymbolShape};
use crate::render::{HAlign, Renderer, VAlign};
use crate::shared::Theme;

/// Berechnet Box, Port-Positionen und Label-Boxen eines Bauteils.
///
/// Die Breite startet bei `theme.component_width` und wächst, wenn
/// Port- oder Typ-Label nicht hineinpassen. Die Höhe folgt aus der
/// größeren Portzahl einer Seite. Ports sitzen auf halber Rahmenstärke
/// in der linken (Eingänge) bzw. rechten Kante (Ausgänge), gleichmäßig
/// über die Höhe verteilt. Veralteter Key → No-op.
pub fn layout_component(
    circuit: &mut Circuit,
    theme: &Theme,
    renderer: &dyn Renderer,
    key: ComponentKey,
) {
    let Some(component) = circuit.component(key) else {
        return;
    };
    let shape = descriptor(component.desc).shape;
    let type_label_key = component.type_label;
    let name_label_key = component.name_label;
    let ports: Vec<_> = circuit
        .ports_of(key)
        .map(|(port_key, port)| (port_key, port.direction, port.label))
        .collect();

    let pad = theme.label_padding;
    let font_size = theme.label_font_size;
    let mut width = theme.component_width;

    // Breite: jedes Port-Label muss neben dem Port-Quadrat Platz finden
    let mut num_inputs = 0;
    let mut num_outputs = 0;
    for (_, direction, label_key) in &ports {
        match direction {
            PortDirection::In => num_inputs += 1,
            PortDirection::Out => num_outputs += 1,
        }
        let Some(label) = circuit.label(*label_key) else {
            continue;
        };
        let bounds = renderer.text_bounds(
            Vec2::ZERO,
            &label.text,
            HAlign::Center,
            VAlign::Middle,
            font_size,
        );
        let desired_half = bounds.half_size.x * 2.0 + pad * 3.0 + theme.port_width / 2.0;
        if desired_half > width / 2.0 {
            width = desired_half * 2.0;
        }
    }

    let height = num_inputs.max(num_outputs) as f32 * theme.port_spacing + theme.port_spacing;

    // Typ-Label oben zentriert; kann die Breite weiter aufziehen
    if let Some(label) = circuit.label(type_label_key) {
        let bounds = renderer.text_bounds(
            Vec2::new(0.0, -(height / 2.0) + pad),
            &label.text,
            HAlign::Center,
            VAlign::Top,
            font_size,
        );
        if bounds.half_size.x + pad > width / 2.0 {
            width = bounds.half_size.x * 2.0 + pad * 2.0;
        }
        if let Some(label) = circuit.label_mut(type_label_key) {
            label.bounds = bounds;
        }
    }

    // Namens-Label über der Oberkante; bei Gatter-Formen ein Stück tiefer
    let mut name_y = -(height / 2.0) + pad;
    if shape != SymbolShape::Default {
        name_y += height / 5.0;
    }
    if let Some(label) = circuit.label(name_label_key) {
        let bounds = renderer.text_bounds(
            Vec2::new(0.0, name_y),
            &label.text,
            HAlign::Center,
            VAlign::Bottom,
            font_size,
        );
        if let Some(label) = circuit.label_mut(name_label_key) {
            label.bounds = bounds;
        }
    }

    if let Some(component) = circuit.component_mut(key) {
        component.bounds.half_size = Vec2::new(width / 2.0, height / 2.0);
    }

    // Port-Positionen: gleichmäßig verteilt, Kette in Definitions-Reihenfolge
    let left_inc = height / (num_inputs + 1) as f32;
    let right_inc = height / (num_outputs + 1) as f32;
    let mut left_y = left_inc - height / 2.0;
    let mut right_y = right_inc - height / 2.0;
    let border = theme.border_width;

    for (port_key, direction, label_key) in &ports {
        let (position, label_pos, halign) = match direction {
            PortDirection::In => {
                let position = Vec2::new(-width / 2.0 + border / 2.0, left_y);
                left_y += left_inc;
                let label_pos = Vec2::new(pad + theme.port_width / 2.0, 0.0);
                (position, label_pos, HAlign::Left)
            }
            PortDirection::Out => {
                let position = Vec2::new(width / 2.0 - border / 2.0, right_y);
                right_y += right_inc;
                let label_pos = Vec2::new(-pad - theme.port_width / 2.0, 0.0);
                (position, label_pos, HAlign::Right)
            }
        };
        if let Some(port) = circuit.port_mut(*port_key) {
            port.position = position;
        }

        let bounds = match circuit.label(*label_key) {
            Some(label) => renderer.text_bounds(
                label_pos,
                &label.text,
                halign,
                VAlign::Middle,
                font_size,
            ),
            None => continue,
        };
        if let Some(label) = circuit.label_mut(*label_key) {
            label.bounds = bounds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DESC_AND, DESC_IN};
    use crate::render::RecordingRenderer;
    use approx::assert_relative_eq;

    fn laid_out(desc: crate::core::DescriptorId) -> (Circuit, ComponentKey) {
        let mut circuit = Circuit::new();
        let key = circuit.add_component(desc, Vec2::ZERO);
        let theme = Theme::default();
        let renderer = RecordingRenderer::new();
        layout_component(&mut circuit, &theme, &renderer, key);
        (circuit, key)
    }

    #[test]
    fn test_and_gate_keeps_minimum_width() {
        let (circuit, key) = laid_out(DESC_AND);
        let component = circuit.component(key).expect("Bauteil");
        // Kurze Labels ("A", "B", "Y") brauchen keine Verbreiterung
        assert_relative_eq!(component.bounds.half_size.x, 55.0 / 2.0);
        // 2 Eingänge → Höhe = 2 * 20 + 20
        assert_relative_eq!(component.bounds.half_size.y, 30.0);
    }

    #[test]
    fn test_ports_distribute_over_height() {
        let (circuit, key) = laid_out(DESC_AND);
        let positions: Vec<_> = circuit.ports_of(key).map(|(_, p)| p.position).collect();

        // Eingänge links: Höhe 60, Inkrement 20 → y = -10 und 10
        assert_relative_eq!(positions[0].x, -27.0); // -55/2 + border/2
        assert_relative_eq!(positions[0].y, -10.0);
        assert_relative_eq!(positions[1].y, 10.0);
        // Ausgang rechts mittig: Inkrement 30 → y = 0
        assert_relative_eq!(positions[2].x, 27.0);
        assert_relative_eq!(positions[2].y, 0.0);
    }

    #[test]
    fn test_layout_with_zero_input_ports() {
        // Eingangs-Pin hat keine Input-Ports; Höhe folgt allein aus dem Ausgang
        let (circuit, key) = laid_out(DESC_IN);
        let component = circuit.component(key).expect("Bauteil");
        assert_relative_eq!(component.bounds.half_size.y, 20.0); // 1 * 20 + 20, halbiert

        let positions: Vec<_> = circuit.ports_of(key).map(|(_, p)| p.position).collect();
        assert_eq!(positions.len(), 1);
        assert_relative_eq!(positions[0].y, 0.0);
        assert!(positions[0].x > 0.0);
        assert!(positions[0].x.is_finite());
    }

    #[test]
    fn test_wide_labels_grow_width() {
        let mut circuit = Circuit::new();
        let key = circuit.add_component(DESC_AND, Vec2::ZERO);
        let mut theme = Theme::default();
        theme.label_font_size = 40.0; // Labels passen nicht mehr in 55 Einheiten
        let renderer = RecordingRenderer::new();
        layout_component(&mut circuit, &theme, &renderer, key);

        let component = circuit.component(key).expect("Bauteil");
        // Port-Label "A": halbe Breite 12 → gewünschte Halbbreite 33.5 → Breite 67;
        // Typ-Label "AND": halbe Breite 36 → Breite 76
        assert_relative_eq!(component.bounds.half_size.x, 38.0);
    }

    #[test]
    fn test_name_label_drops_on_gate_shapes() {
        let (circuit, key) = laid_out(DESC_AND);
        let component = circuit.component(key).expect("Bauteil");
        let name = circuit.label(component.name_label).expect("Label");
        // Anker: -30 + 2 + 60/5 = -16, Bottom-Ausrichtung hebt die Box darüber
        assert_relative_eq!(name.bounds.max().y, -16.0);

        let (circuit, key) = laid_out(DESC_IN);
        let component = circuit.component(key).expect("Bauteil");
        let name = circuit.label(component.name_label).expect("Label");
        // Default-Form: Anker direkt unter der Oberkante, ohne Versatz
        assert_relative_eq!(name.bounds.max().y, -(20.0) + 2.0);
    }
}
