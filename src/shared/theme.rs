//! Zentrale Konfiguration für den Schaltplan-Editor.
//!
//! `Theme` enthält alle zur Laufzeit änderbaren Darstellungs- und
//! Interaktionswerte. Die `const`-Werte bleiben als Fallback/Default
//! erhalten.

use serde::{Deserialize, Serialize};

// ── Bauteile ────────────────────────────────────────────────────────

/// Vertikaler Abstand zwischen Ports in Welteinheiten.
pub const PORT_SPACING: f32 = 20.0;
/// Mindestbreite eines Bauteils in Welteinheiten.
pub const COMPONENT_WIDTH: f32 = 55.0;
/// Kantenlänge eines Port-Quadrats.
pub const PORT_WIDTH: f32 = 7.0;
/// Rahmenstärke von Bauteilen und Ports.
pub const BORDER_WIDTH: f32 = 1.0;
/// Eckenradius von Bauteil-Rechtecken.
pub const COMPONENT_RADIUS: f32 = 5.0;

// ── Leitungen ───────────────────────────────────────────────────────

/// Linienstärke von Netz-Leitungen.
pub const WIRE_THICKNESS: f32 = 2.0;
/// Linienstärke von Gatter-Symbolen.
pub const GATE_THICKNESS: f32 = 3.0;

// ── Labels ──────────────────────────────────────────────────────────

/// Innenabstand von Labels zur Bezugskante.
pub const LABEL_PADDING: f32 = 2.0;
/// Schriftgröße von Labels in Welteinheiten.
pub const LABEL_FONT_SIZE: f32 = 12.0;

// ── Farben ──────────────────────────────────────────────────────────

/// Füllfarbe von Bauteilen (RGBA: Grau).
pub const COLOR_COMPONENT: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
/// Rahmenfarbe von Bauteilen (RGBA: Hellgrau).
pub const COLOR_COMPONENT_BORDER: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
/// Füllfarbe von Ports (RGBA: Grün).
pub const COLOR_PORT: [f32; 4] = [0.3, 0.6, 0.3, 1.0];
/// Rahmenfarbe von Ports (RGBA: Dunkelgrau).
pub const COLOR_PORT_BORDER: [f32; 4] = [0.3, 0.3, 0.3, 1.0];
/// Farbe von Netz-Leitungen (RGBA: Grün).
pub const COLOR_WIRE: [f32; 4] = [0.3, 0.6, 0.3, 1.0];
/// Akzentfarbe für Hover (RGBA: Hellgrau).
pub const COLOR_HOVERED: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
/// Akzentfarbe für Selektion (RGBA: Blau).
pub const COLOR_SELECTED: [f32; 4] = [0.3, 0.3, 0.6, 1.0];
/// Füllfarbe des Auswahlrechtecks (RGBA: Dunkelblau).
pub const COLOR_SELECT_FILL: [f32; 4] = [0.2, 0.2, 0.35, 1.0];
/// Farbe von Typ- und Port-Labels (RGBA: Schwarz).
pub const COLOR_LABEL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Farbe von Namens-Labels (RGBA: Hellgrau).
pub const COLOR_NAME: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
/// Farbe von Wurzel-Leitungen im Debug-Modus (RGBA: Rot).
pub const COLOR_WIRE_DEBUG: [f32; 4] = [0.9, 0.2, 0.2, 1.0];

// ── Interaktion ─────────────────────────────────────────────────────

/// Halbgröße der Maus-Box für Bauteil- und Port-Hover (Welteinheiten).
pub const MOUSE_FUDGE: f32 = 1.5;
/// Halbgröße der Maus-Box für Wegpunkt-Hover (Welteinheiten).
pub const WAYPOINT_FUDGE: f32 = 5.0;
/// Drag-Schwelle in Screen-Pixeln, ab der eine Bewegung als Drag gilt.
pub const MOVE_THRESHOLD_PX: f32 = 5.0;
/// Tastatur-Pan-Geschwindigkeit in Screen-Pixeln pro Sekunde.
pub const PAN_SPEED: f32 = 1000.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Darstellungs- und Interaktionswerte.
/// Wird als `schaltplan_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    // ── Bauteile ────────────────────────────────────────────────
    /// Vertikaler Port-Abstand in Welteinheiten
    pub port_spacing: f32,
    /// Mindestbreite eines Bauteils
    pub component_width: f32,
    /// Kantenlänge eines Port-Quadrats
    pub port_width: f32,
    /// Rahmenstärke von Bauteilen und Ports
    pub border_width: f32,
    /// Eckenradius von Bauteil-Rechtecken
    pub component_radius: f32,

    // ── Leitungen ───────────────────────────────────────────────
    /// Linienstärke von Netz-Leitungen
    pub wire_thickness: f32,
    /// Linienstärke von Gatter-Symbolen
    pub gate_thickness: f32,

    // ── Labels ──────────────────────────────────────────────────
    /// Innenabstand von Labels zur Bezugskante
    pub label_padding: f32,
    /// Schriftgröße in Welteinheiten
    pub label_font_size: f32,

    // ── Farben ──────────────────────────────────────────────────
    /// Füllfarbe von Bauteilen
    pub color_component: [f32; 4],
    /// Rahmenfarbe von Bauteilen
    pub color_component_border: [f32; 4],
    /// Füllfarbe von Ports
    pub color_port: [f32; 4],
    /// Rahmenfarbe von Ports
    pub color_port_border: [f32; 4],
    /// Farbe von Netz-Leitungen
    pub color_wire: [f32; 4],
    /// Akzentfarbe für Hover
    pub color_hovered: [f32; 4],
    /// Akzentfarbe für Selektion
    pub color_selected: [f32; 4],
    /// Füllfarbe des Auswahlrechtecks
    pub color_select_fill: [f32; 4],
    /// Farbe von Typ- und Port-Labels
    pub color_label: [f32; 4],
    /// Farbe von Namens-Labels
    pub color_name: [f32; 4],
    /// Farbe von Wurzel-Leitungen im Debug-Modus
    #[serde(default = "default_color_wire_debug")]
    pub color_wire_debug: [f32; 4],

    // ── Interaktion ─────────────────────────────────────────────
    /// Maus-Box-Halbgröße für Bauteil/Port-Hover (Welteinheiten)
    pub mouse_fudge: f32,
    /// Maus-Box-Halbgröße für Wegpunkt-Hover (Welteinheiten)
    pub waypoint_fudge: f32,
    /// Drag-Schwelle in Screen-Pixeln
    pub move_threshold_px: f32,
    /// Tastatur-Pan-Geschwindigkeit in Screen-Pixeln pro Sekunde
    #[serde(default = "default_pan_speed")]
    pub pan_speed: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            port_spacing: PORT_SPACING,
            component_width: COMPONENT_WIDTH,
            port_width: PORT_WIDTH,
            border_width: BORDER_WIDTH,
            component_radius: COMPONENT_RADIUS,

            wire_thickness: WIRE_THICKNESS,
            gate_thickness: GATE_THICKNESS,

            label_padding: LABEL_PADDING,
            label_font_size: LABEL_FONT_SIZE,

            color_component: COLOR_COMPONENT,
            color_component_border: COLOR_COMPONENT_BORDER,
            color_port: COLOR_PORT,
            color_port_border: COLOR_PORT_BORDER,
            color_wire: COLOR_WIRE,
            color_hovered: COLOR_HOVERED,
            color_selected: COLOR_SELECTED,
            color_select_fill: COLOR_SELECT_FILL,
            color_label: COLOR_LABEL,
            color_name: COLOR_NAME,
            color_wire_debug: COLOR_WIRE_DEBUG,

            mouse_fudge: MOUSE_FUDGE,
            waypoint_fudge: WAYPOINT_FUDGE,
            move_threshold_px: MOVE_THRESHOLD_PX,
            pan_speed: PAN_SPEED,
        }
    }
}

/// Serde-Default für `color_wire_debug` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_color_wire_debug() -> [f32; 4] {
    COLOR_WIRE_DEBUG
}

/// Serde-Default für `pan_speed` (Abwärtskompatibilität).
fn default_pan_speed() -> f32 {
    PAN_SPEED
}

impl Theme {
    /// Lädt das Theme aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(theme) => {
                    log::info!("Theme geladen aus: {}", path.display());
                    theme
                }
                Err(e) => {
                    log::warn!("Theme-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Theme-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert das Theme als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Theme gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Theme-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("schaltplan_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("schaltplan_editor.toml")
    }

    /// Drag-Schwelle in Welteinheiten beim aktuellen Zoom.
    pub fn move_threshold_world(&self, zoom: f32) -> f32 {
        self.move_threshold_px / zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_matches_constants() {
        let theme = Theme::default();
        assert_eq!(theme.component_width, COMPONENT_WIDTH);
        assert_eq!(theme.port_spacing, PORT_SPACING);
        assert_eq!(theme.mouse_fudge, MOUSE_FUDGE);
        assert_eq!(theme.color_selected, COLOR_SELECTED);
    }

    #[test]
    fn test_theme_toml_round_trip() {
        let theme = Theme::default();
        let toml_text = toml::to_string_pretty(&theme).expect("Serialisierung muss klappen");
        let parsed: Theme = toml::from_str(&toml_text).expect("Deserialisierung muss klappen");
        assert_eq!(parsed.port_width, theme.port_width);
        assert_eq!(parsed.color_wire, theme.color_wire);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        // Alte Datei ohne die später ergänzten Felder
        let toml_text = r#"
            port_spacing = 20.0
            component_width = 55.0
            port_width = 7.0
            border_width = 1.0
            component_radius = 5.0
            wire_thickness = 2.0
            gate_thickness = 3.0
            label_padding = 2.0
            label_font_size = 12.0
            color_component = [0.5, 0.5, 0.5, 1.0]
            color_component_border = [0.8, 0.8, 0.8, 1.0]
            color_port = [0.3, 0.6, 0.3, 1.0]
            color_port_border = [0.3, 0.3, 0.3, 1.0]
            color_wire = [0.3, 0.6, 0.3, 1.0]
            color_hovered = [0.6, 0.6, 0.6, 1.0]
            color_selected = [0.3, 0.3, 0.6, 1.0]
            color_select_fill = [0.2, 0.2, 0.35, 1.0]
            color_label = [0.0, 0.0, 0.0, 1.0]
            color_name = [0.8, 0.8, 0.8, 1.0]
            mouse_fudge = 1.5
            waypoint_fudge = 5.0
            move_threshold_px = 5.0
        "#;
        let parsed: Theme = toml::from_str(toml_text).expect("Deserialisierung muss klappen");
        assert_eq!(parsed.pan_speed, PAN_SPEED);
        assert_eq!(parsed.color_wire_debug, COLOR_WIRE_DEBUG);
    }

    #[test]
    fn test_move_threshold_scales_with_zoom() {
        let theme = Theme::default();
        approx::assert_relative_eq!(theme.move_threshold_world(1.0), MOVE_THRESHOLD_PX);
        approx::assert_relative_eq!(theme.move_threshold_world(2.0), MOVE_THRESHOLD_PX / 2.0);
    }
}
