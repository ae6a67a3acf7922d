//! Statische Bauteil-Beschreibungen (Descriptoren).
//!
//! Ein Descriptor definiert Typ-Name, Symbol-Form, Designator-Präfix und
//! die Port-Liste eines Bauteil-Typs. Alle Instanzen teilen sich denselben
//! Descriptor; die Tabelle ist zur Compile-Zeit fixiert.

/// Richtung eines Ports aus Sicht des Bauteils.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    /// Eingang (linke Kante)
    In,
    /// Ausgang (rechte Kante)
    Out,
}

/// Symbol-Form eines Bauteils.
///
/// `Default` ist die beschriftete Rechteck-Form; Gate-Formen zeichnen
/// ihre klassischen Umrisse und unterdrücken Typ-/Port-Labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolShape {
    Default,
    And,
    Or,
    Xor,
    Not,
}

/// Statische Beschreibung eines Ports innerhalb eines Descriptors.
#[derive(Debug, Clone, Copy)]
pub struct PortDesc {
    /// Anzeigename ("A", "B", "Y", ...)
    pub name: &'static str,
    /// Ein- oder Ausgang
    pub direction: PortDirection,
}

/// Statische Beschreibung eines Bauteil-Typs.
#[derive(Debug, Clone, Copy)]
pub struct ComponentDesc {
    /// Typ-Name, erscheint als Typ-Label ("AND", "NOT", ...)
    pub type_name: &'static str,
    /// Designator-Präfix für generierte Namen ("U" → "U1", "U2", ...)
    pub prefix: &'static str,
    /// Symbol-Form
    pub shape: SymbolShape,
    /// Ports in Definitions-Reihenfolge (bestimmt die Pin-Nummern)
    pub ports: &'static [PortDesc],
}

impl ComponentDesc {
    /// Anzahl der Eingangs-Ports.
    pub fn input_count(&self) -> usize {
        self.ports
            .iter()
            .filter(|p| p.direction == PortDirection::In)
            .count()
    }

    /// Anzahl der Ausgangs-Ports.
    pub fn output_count(&self) -> usize {
        self.ports.len() - self.input_count()
    }
}

/// Index in die eingebaute Descriptor-Tabelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DescriptorId(pub usize);

const PORT_IN_A: PortDesc = PortDesc {
    name: "A",
    direction: PortDirection::In,
};
const PORT_IN_B: PortDesc = PortDesc {
    name: "B",
    direction: PortDirection::In,
};
const PORT_OUT_Y: PortDesc = PortDesc {
    name: "Y",
    direction: PortDirection::Out,
};

/// Eingebaute Bauteil-Typen.
pub static DESCRIPTORS: &[ComponentDesc] = &[
    ComponentDesc {
        type_name: "AND",
        prefix: "U",
        shape: SymbolShape::And,
        ports: &[PORT_IN_A, PORT_IN_B, PORT_OUT_Y],
    },
    ComponentDesc {
        type_name: "OR",
        prefix: "U",
        shape: SymbolShape::Or,
        ports: &[PORT_IN_A, PORT_IN_B, PORT_OUT_Y],
    },
    ComponentDesc {
        type_name: "XOR",
        prefix: "U",
        shape: SymbolShape::Xor,
        ports: &[PORT_IN_A, PORT_IN_B, PORT_OUT_Y],
    },
    ComponentDesc {
        type_name: "NOT",
        prefix: "U",
        shape: SymbolShape::Not,
        ports: &[PORT_IN_A, PORT_OUT_Y],
    },
    ComponentDesc {
        type_name: "IN",
        prefix: "I",
        shape: SymbolShape::Default,
        ports: &[PORT_OUT_Y],
    },
    ComponentDesc {
        type_name: "OUT",
        prefix: "O",
        shape: SymbolShape::Default,
        ports: &[PORT_IN_A],
    },
];

/// Bequeme Ids für die eingebauten Typen (Reihenfolge wie `DESCRIPTORS`).
pub const DESC_AND: DescriptorId = DescriptorId(0);
pub const DESC_OR: DescriptorId = DescriptorId(1);
pub const DESC_XOR: DescriptorId = DescriptorId(2);
pub const DESC_NOT: DescriptorId = DescriptorId(3);
pub const DESC_IN: DescriptorId = DescriptorId(4);
pub const DESC_OUT: DescriptorId = DescriptorId(5);

/// Liefert den Descriptor zu einer Id.
///
/// Ids stammen ausschließlich aus den `DESC_*`-Konstanten bzw. der
/// Palette; eine unbekannte Id fällt auf den ersten Eintrag zurück statt
/// zu panicken.
pub fn descriptor(id: DescriptorId) -> &'static ComponentDesc {
    DESCRIPTORS.get(id.0).unwrap_or(&DESCRIPTORS[0])
}
