use std::fmt;

use serde::Serialize;

pub const STAGE_COUNT: usize = 5;
pub const STEP_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
/// Identifier of one of the five workflow stages (1..=5).
pub struct StageId(u8);

impl StageId {
    /// Returns `None` when `raw` does not name a catalog stage.
    pub fn new(raw: u8) -> Option<Self> {
        STAGES
            .iter()
            .any(|stage| stage.id.0 == raw)
            .then_some(Self(raw))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn descriptor(self) -> &'static StageDescriptor {
        &STAGES[usize::from(self.0 - 1)]
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
/// Identifier of one of the eight concept-stage steps (1..=8).
pub struct StepId(u8);

impl StepId {
    /// Returns `None` when `raw` does not name a catalog step.
    pub fn new(raw: u8) -> Option<Self> {
        STEPS
            .iter()
            .any(|step| step.id.0 == raw)
            .then_some(Self(raw))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn info(self) -> &'static StepInfo {
        &STEPS[usize::from(self.0 - 1)]
    }

    pub fn all() -> impl Iterator<Item = StepId> {
        STEPS.iter().map(|step| step.id)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDescriptor {
    pub id: StageId,
    pub name: &'static str,
    pub description: &'static str,
    pub step_ids: &'static [StepId],
    pub color: &'static str,
    pub icon: &'static str,
}

impl StageDescriptor {
    pub fn includes_step(&self, step: StepId) -> bool {
        self.step_ids.contains(&step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepColors {
    pub accent: &'static str,
    pub background: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    pub id: StepId,
    pub title: &'static str,
    pub icon: &'static str,
    pub colors: StepColors,
    pub pain_points: &'static [&'static str],
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub stakeholders: &'static [&'static str],
}

impl StepInfo {
    /// First stage whose step list contains this step.
    pub fn stage(&self) -> Option<&'static StageDescriptor> {
        STAGES.iter().find(|stage| stage.includes_step(self.id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub key: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

pub static STAGES: [StageDescriptor; STAGE_COUNT] = [
    StageDescriptor {
        id: StageId(1),
        name: "Concept",
        description: "Client brief through to the concept design report: the eight digitised sub-processes.",
        step_ids: &[
            StepId(1),
            StepId(2),
            StepId(3),
            StepId(4),
            StepId(5),
            StepId(6),
            StepId(7),
            StepId(8),
        ],
        color: "#2563eb",
        icon: "lightbulb",
    },
    StageDescriptor {
        id: StageId(2),
        name: "Schematic",
        description: "Selected systems developed into coordinated schematics and sized plant.",
        step_ids: &[],
        color: "#7c3aed",
        icon: "git-branch",
    },
    StageDescriptor {
        id: StageId(3),
        name: "Detailed Design",
        description: "Fully coordinated services layouts, calculations and specifications.",
        step_ids: &[],
        color: "#059669",
        icon: "ruler",
    },
    StageDescriptor {
        id: StageId(4),
        name: "Tender",
        description: "Cost plan and procurement-ready information for contractor pricing.",
        step_ids: &[],
        color: "#d97706",
        icon: "file-text",
    },
    StageDescriptor {
        id: StageId(5),
        name: "VFC",
        description: "Verified-for-construction design report and coordinated model handover.",
        step_ids: &[],
        color: "#dc2626",
        icon: "check-circle",
    },
];

pub static STEPS: [StepInfo; STEP_COUNT] = [
    StepInfo {
        id: StepId(1),
        title: "Project Brief & Client Requirements",
        icon: "clipboard",
        colors: StepColors {
            accent: "#2563eb",
            background: "#eff6ff",
        },
        pain_points: &[
            "Requirements scattered across emails and meeting notes",
            "Design criteria re-keyed into every calculation",
        ],
        inputs: &["Client brief", "Architectural massing", "Planning conditions"],
        outputs: &["Design criteria register", "Room data sheets"],
        stakeholders: &["Client", "Architect", "MEP lead"],
    },
    StepInfo {
        id: StepId(2),
        title: "Site & Utility Survey",
        icon: "map-pin",
        colors: StepColors {
            accent: "#0891b2",
            background: "#ecfeff",
        },
        pain_points: &[
            "Utility records arrive late and in mixed formats",
            "Incoming supply capacity unknown until late in design",
        ],
        inputs: &["Utility asset records", "Topographic survey", "Site photographs"],
        outputs: &["Utility capacity summary", "Point-of-connection options"],
        stakeholders: &["Utility providers", "Surveyor", "MEP lead"],
    },
    StepInfo {
        id: StepId(3),
        title: "Load Estimation",
        icon: "calculator",
        colors: StepColors {
            accent: "#7c3aed",
            background: "#f5f3ff",
        },
        pain_points: &[
            "Spreadsheet calculations drift from the architectural model",
            "Diversity factors applied inconsistently",
        ],
        inputs: &["Room data sheets", "Occupancy profiles", "Climate data"],
        outputs: &[
            "Heating and cooling loads",
            "Electrical maximum demand",
            "Water demand",
        ],
        stakeholders: &["Mechanical engineer", "Electrical engineer", "Public health engineer"],
    },
    StepInfo {
        id: StepId(4),
        title: "System Options Appraisal",
        icon: "layers",
        colors: StepColors {
            accent: "#9333ea",
            background: "#faf5ff",
        },
        pain_points: &[
            "Options compared on inconsistent assumptions",
            "Carbon impact assessed after the decision is made",
        ],
        inputs: &["Calculated loads", "Utility capacity summary", "Client design criteria"],
        outputs: &["Options appraisal matrix", "Preferred system strategy"],
        stakeholders: &["MEP lead", "Client", "Sustainability consultant"],
    },
    StepInfo {
        id: StepId(5),
        title: "Plant Space Planning",
        icon: "box",
        colors: StepColors {
            accent: "#059669",
            background: "#ecfdf5",
        },
        pain_points: &[
            "Plant rooms sized from rules of thumb",
            "Riser clashes discovered during coordination",
        ],
        inputs: &["Preferred system strategy", "Equipment schedules", "Architectural layouts"],
        outputs: &["Plant room layouts", "Riser and distribution zones"],
        stakeholders: &["Architect", "Structural engineer", "MEP lead"],
    },
    StepInfo {
        id: StepId(6),
        title: "Energy & Sustainability Strategy",
        icon: "leaf",
        colors: StepColors {
            accent: "#16a34a",
            background: "#f0fdf4",
        },
        pain_points: &[
            "Energy model rebuilt from scratch for each iteration",
            "Certification credits tracked manually",
        ],
        inputs: &["Preferred system strategy", "Building fabric data", "Certification targets"],
        outputs: &["Energy statement", "Operational carbon estimate"],
        stakeholders: &["Sustainability consultant", "Client", "Planning authority"],
    },
    StepInfo {
        id: StepId(7),
        title: "Cost Plan",
        icon: "pound-sterling",
        colors: StepColors {
            accent: "#d97706",
            background: "#fffbeb",
        },
        pain_points: &[
            "Quantities extracted by hand from drawings",
            "Late design changes not reflected in cost",
        ],
        inputs: &["Equipment schedules", "Plant room layouts", "Distribution quantities"],
        outputs: &["MEP cost plan", "Value engineering register"],
        stakeholders: &["Cost consultant", "Client", "MEP lead"],
    },
    StepInfo {
        id: StepId(8),
        title: "Concept Design Report",
        icon: "book-open",
        colors: StepColors {
            accent: "#dc2626",
            background: "#fef2f2",
        },
        pain_points: &[
            "Report assembled by copy-paste from several tools",
            "No single source of truth for issued figures",
        ],
        inputs: &["Options appraisal matrix", "Energy statement", "MEP cost plan"],
        outputs: &["Concept design report", "Coordinated concept model"],
        stakeholders: &["Client", "Design team", "MEP lead"],
    },
];

pub static SERVICES: [ServiceDescriptor; 6] = [
    ServiceDescriptor {
        key: "design-automation",
        name: "Design Automation",
        summary: "Rule-driven generation of layouts, schedules and sizing from the design criteria.",
        icon: "cpu",
        color: "#2563eb",
    },
    ServiceDescriptor {
        key: "calculation-engine",
        name: "Calculation Engine",
        summary: "Shared load, pipe and cable sizing calculations fed directly from the model.",
        icon: "calculator",
        color: "#7c3aed",
    },
    ServiceDescriptor {
        key: "bim-coordination",
        name: "BIM Coordination",
        summary: "Federated model checks, clash detection and issue tracking across disciplines.",
        icon: "boxes",
        color: "#059669",
    },
    ServiceDescriptor {
        key: "document-control",
        name: "Document Control",
        summary: "Controlled issue of drawings, reports and schedules with revision history.",
        icon: "folder",
        color: "#d97706",
    },
    ServiceDescriptor {
        key: "data-platform",
        name: "Data Platform",
        summary: "Single project data store linking requirements, calculations and deliverables.",
        icon: "database",
        color: "#0891b2",
    },
    ServiceDescriptor {
        key: "digital-twin",
        name: "Digital Twin",
        summary: "Operational handover model carrying design intent into facilities management.",
        icon: "activity",
        color: "#dc2626",
    },
];

pub static LEGEND: [LegendEntry; 4] = [
    LegendEntry {
        key: "step",
        label: "Workflow step",
        color: "#2563eb",
        icon: "square",
    },
    LegendEntry {
        key: "input",
        label: "Input information",
        color: "#0891b2",
        icon: "arrow-down-right",
    },
    LegendEntry {
        key: "output",
        label: "Output deliverable",
        color: "#059669",
        icon: "arrow-up-right",
    },
    LegendEntry {
        key: "pain-point",
        label: "Current pain point",
        color: "#dc2626",
        icon: "alert-triangle",
    },
];

/// Mermaid definition of the concept flow, placed on the clipboard by the copy action.
pub const DIAGRAM_DEFINITION: &str = "flowchart LR
    S1[Project Brief & Client Requirements] --> S2[Site & Utility Survey]
    S2 --> S3[Load Estimation]
    S3 --> S4[System Options Appraisal]
    S4 --> S5[Plant Space Planning]
    S4 --> S6[Energy & Sustainability Strategy]
    S5 --> S7[Cost Plan]
    S6 --> S7
    S7 --> S8[Concept Design Report]
    subgraph Concept
        S1
        S2
        S3
        S4
        S5
        S6
        S7
        S8
    end
    Concept --> Schematic --> DetailedDesign[Detailed Design] --> Tender --> VFC
";

pub fn stage_by_id(raw: u8) -> Option<&'static StageDescriptor> {
    StageId::new(raw).map(StageId::descriptor)
}

pub fn step_by_id(raw: u8) -> Option<&'static StepInfo> {
    StepId::new(raw).map(StepId::info)
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Serializable view of the whole catalog for the JSON API.
pub struct ReferenceCatalog {
    pub stages: &'static [StageDescriptor],
    pub steps: &'static [StepInfo],
    pub services: &'static [ServiceDescriptor],
    pub legend: &'static [LegendEntry],
}

pub fn reference_catalog() -> ReferenceCatalog {
    ReferenceCatalog {
        stages: &STAGES,
        steps: &STEPS,
        services: &SERVICES,
        legend: &LEGEND,
    }
}
