//! Solution catalog: the six situation → solution profiles the engine recommends from.
//!
//! Wording lives here and nowhere else. Bump `CATALOG_VERSION` whenever copy or
//! feature lists change so persisted diagnoses can be traced to the revision
//! that produced them.

use serde::{Deserialize, Serialize};

use crate::diagnosis::language::Text;

/// Revision of the static catalog and score tables.
pub const CATALOG_VERSION: &str = "2024.1";

/// Step-1 answer: the prospect's primary use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    Audits,
    Expansion,
    Tenders,
    DueDiligence,
    Contracts,
    SensitiveContract,
}

/// Product recommended to a prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solution {
    DataRoomAudit,
    GapAnalysis,
    DealTeaser,
    DataRoomPrep,
    DealVisor,
    SmartDataRoom,
}

/// Static reference data for one situation.
#[derive(Debug)]
pub struct SolutionProfile {
    pub situation: Situation,
    pub solution: Solution,
    pub title: Text,
    pub description: Text,
    pub features: &'static [Text],
    pub next_steps: &'static [Text],
}

impl Situation {
    pub const ALL: [Situation; 6] = [
        Situation::Audits,
        Situation::Expansion,
        Situation::Tenders,
        Situation::DueDiligence,
        Situation::Contracts,
        Situation::SensitiveContract,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Situation::Audits => "audits",
            Situation::Expansion => "expansion",
            Situation::Tenders => "tenders",
            Situation::DueDiligence => "due_diligence",
            Situation::Contracts => "contracts",
            Situation::SensitiveContract => "sensitive_contract",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn profile(self) -> &'static SolutionProfile {
        match self {
            Situation::Audits => &AUDITS,
            Situation::Expansion => &EXPANSION,
            Situation::Tenders => &TENDERS,
            Situation::DueDiligence => &DUE_DILIGENCE,
            Situation::Contracts => &CONTRACTS,
            Situation::SensitiveContract => &SENSITIVE_CONTRACT,
        }
    }
}

impl Solution {
    pub const ALL: [Solution; 6] = [
        Solution::DataRoomAudit,
        Solution::GapAnalysis,
        Solution::DealTeaser,
        Solution::DataRoomPrep,
        Solution::DealVisor,
        Solution::SmartDataRoom,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Solution::DataRoomAudit => "data_room_audit",
            Solution::GapAnalysis => "gap_analysis",
            Solution::DealTeaser => "deal_teaser",
            Solution::DataRoomPrep => "data_room_prep",
            Solution::DealVisor => "deal_visor",
            Solution::SmartDataRoom => "smart_data_room",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// The situation whose profile recommends this solution (one-to-one).
    pub fn situation(self) -> Situation {
        self.profile().situation
    }

    pub fn profile(self) -> &'static SolutionProfile {
        match self {
            Solution::DataRoomAudit => &AUDITS,
            Solution::GapAnalysis => &EXPANSION,
            Solution::DealTeaser => &TENDERS,
            Solution::DataRoomPrep => &DUE_DILIGENCE,
            Solution::DealVisor => &CONTRACTS,
            Solution::SmartDataRoom => &SENSITIVE_CONTRACT,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profiles
// ────────────────────────────────────────────────────────────────────────────

static AUDITS: SolutionProfile = SolutionProfile {
    situation: Situation::Audits,
    solution: Solution::DataRoomAudit,
    title: Text::new("Data Room for Audits", "Data Room para Auditorías"),
    description: Text::new(
        "A Data Room solution with reusable templates by stakeholder to share documentation securely and efficiently during ESG, risk, regulatory compliance, AI governance, and data privacy audits.",
        "Una solución de Data Room con templates reutilizables por stakeholder para compartir documentación de forma segura y eficiente durante auditorías de ESG, riesgos, compliance regulatorio, gobernanza de IA y privacidad de datos.",
    ),
    features: &[
        Text::new(
            "Pre-configured templates by audit type",
            "Templates pre-configurados por tipo de auditoría",
        ),
        Text::new(
            "Granular permissions by stakeholder/auditor",
            "Permisos granulares por stakeholder/auditor",
        ),
        Text::new(
            "Complete access traceability",
            "Trazabilidad completa de accesos",
        ),
        Text::new(
            "Automatic document updates",
            "Actualización automática de documentos",
        ),
        Text::new("Audit status dashboard", "Dashboard de estado de auditoría"),
    ],
    next_steps: &[
        Text::new(
            "Schedule personalized Data Room demo",
            "Agendar demo personalizada de Data Room",
        ),
        Text::new(
            "Receive documentation checklist by audit type",
            "Recibir checklist de documentación por tipo de auditoría",
        ),
        Text::new(
            "Free 30-min consultation with specialist",
            "Consulta gratuita de 30 min con especialista",
        ),
    ],
};

static EXPANSION: SolutionProfile = SolutionProfile {
    situation: Situation::Expansion,
    solution: Solution::GapAnalysis,
    title: Text::new("Corporate Doc Gap Analysis", "Corporate Doc Gap Analysis"),
    description: Text::new(
        "An intelligent application that analyzes your current documentation and determines, based on your expansion goals, jurisdiction, vertical and industry, what documentation you'll need in the new market and what gaps you must cover.",
        "Una aplicación inteligente que analiza tu documentación actual y establece, según tus objetivos de expansión, jurisdicción, vertical e industria, qué documentación necesitarás en el nuevo mercado y qué gaps debes cubrir.",
    ),
    features: &[
        Text::new(
            "Automated analysis of existing documentation",
            "Análisis automatizado de documentación existente",
        ),
        Text::new(
            "Requirements mapping by destination jurisdiction",
            "Mapeo de requisitos por jurisdicción destino",
        ),
        Text::new(
            "Document gap identification",
            "Identificación de gaps documentales",
        ),
        Text::new(
            "Compliance roadmap for expansion",
            "Roadmap de compliance para expansión",
        ),
        Text::new("Regulatory change alerts", "Alertas de cambios regulatorios"),
    ],
    next_steps: &[
        Text::new(
            "Schedule free preliminary analysis",
            "Agendar análisis preliminar gratuito",
        ),
        Text::new(
            "Receive requirements matrix by country",
            "Recibir matriz de requisitos por país",
        ),
        Text::new(
            "International expansion workshop",
            "Workshop de expansión internacional",
        ),
    ],
};

static TENDERS: SolutionProfile = SolutionProfile {
    situation: Situation::Tenders,
    solution: Solution::DealTeaser,
    title: Text::new("Deal Teaser for Tenders", "Deal Teaser para Licitaciones"),
    description: Text::new(
        "A solution to prepare professional tender offers, strategically adjust counteroffers, and make associated documentation available based on NDAs and structured deal intent.",
        "Una solución para preparar ofertas de licitación profesionales, ajustar contraofertas estratégicamente y disponibilizar la documentación asociada basada en NDAs y deal intent estructurado.",
    ),
    features: &[
        Text::new(
            "Offer builder with templates",
            "Constructor de ofertas con templates",
        ),
        Text::new("Digital NDA management", "Gestión de NDAs digitales"),
        Text::new(
            "War room for offer preparation",
            "War room para preparación de ofertas",
        ),
        Text::new(
            "Historical competition analysis",
            "Análisis de competencia histórico",
        ),
        Text::new(
            "Tender status tracking",
            "Tracking de estado de licitaciones",
        ),
    ],
    next_steps: &[
        Text::new("Offer preparation demo", "Demo de preparación de ofertas"),
        Text::new(
            "Access to template library",
            "Acceso a biblioteca de templates",
        ),
        Text::new(
            "Tender strategy consulting",
            "Consultoría de estrategia de licitación",
        ),
    ],
};

static DUE_DILIGENCE: SolutionProfile = SolutionProfile {
    situation: Situation::DueDiligence,
    solution: Solution::DataRoomPrep,
    title: Text::new(
        "Data Room Prep for Due Diligence",
        "Data Room Prep para Due Diligence",
    ),
    description: Text::new(
        "An intensive Data Room preparation solution to arrive at due diligence with all documentation adjusted, organized, and ready for review according to M&A best practices.",
        "Una solución de preparación intensiva de Data Room para llegar a la due diligence con toda la documentación ajustada, organizada y lista para revisión según las mejores prácticas M&A.",
    ),
    features: &[
        Text::new(
            "Due diligence checklist by transaction type",
            "Checklist de due diligence por tipo de transacción",
        ),
        Text::new(
            "Automatic document organization",
            "Organización automática de documentos",
        ),
        Text::new("Integrated Q&A management", "Q&A management integrado"),
        Text::new(
            "Real-time preparation index",
            "Índice de preparación en tiempo real",
        ),
        Text::new("Pre-DD review simulation", "Simulación de revisión pre-DD"),
    ],
    next_steps: &[
        Text::new(
            "Current preparation assessment",
            "Assessment de preparación actual",
        ),
        Text::new(
            "DD preparation work plan",
            "Plan de trabajo de preparación DD",
        ),
        Text::new(
            "Process accompaniment",
            "Acompañamiento durante el proceso",
        ),
    ],
};

static CONTRACTS: SolutionProfile = SolutionProfile {
    situation: Situation::Contracts,
    solution: Solution::DealVisor,
    title: Text::new(
        "Deal Visor for Contract Monitoring",
        "Deal Visor para Monitoreo de Contratos",
    ),
    description: Text::new(
        "A continuous monitoring solution for contracts in execution that tracks conditions, milestones, requirements, and obligations that must be achieved or maintained over time.",
        "Una solución de monitoreo continuo de contratos en ejecución que trackea condiciones, hitos, requisitos y obligaciones que deben alcanzarse o mantenerse en el tiempo.",
    ),
    features: &[
        Text::new("Active contracts dashboard", "Dashboard de contratos activos"),
        Text::new(
            "Deadline and milestone alerts",
            "Alertas de vencimientos y hitos",
        ),
        Text::new("Contractual KPI tracking", "Tracking de KPIs contractuales"),
        Text::new("Obligations management", "Gestión de obligaciones"),
        Text::new("Compliance reports", "Reportes de cumplimiento"),
    ],
    next_steps: &[
        Text::new("Current contracts mapping", "Mapeo de contratos actuales"),
        Text::new(
            "Critical alerts configuration",
            "Configuración de alertas críticas",
        ),
        Text::new(
            "Contract management training",
            "Training de gestión contractual",
        ),
    ],
};

static SENSITIVE_CONTRACT: SolutionProfile = SolutionProfile {
    situation: Situation::SensitiveContract,
    solution: Solution::SmartDataRoom,
    title: Text::new(
        "Smart Data Room with Digital Signature",
        "Smart Data Room con Firma Digital",
    ),
    description: Text::new(
        "An intelligent Data Room for sensitive contracts with integrated digital signature, digital evidence registry of conformities, and complete consent management with legal validity.",
        "Un Data Room inteligente para contratos delicados con firma digital integrada, registro de evidencias digitales de conformidades, y gestión completa de consentimientos con validez legal.",
    ),
    features: &[
        Text::new(
            "Digital signature with legal validity",
            "Firma digital con validez legal",
        ),
        Text::new(
            "Immutable evidence registry",
            "Registro inmutable de evidencias",
        ),
        Text::new(
            "GDPR consent management",
            "Gestión de consentimientos GDPR",
        ),
        Text::new("Complete audit trail", "Audit trail completo"),
        Text::new(
            "Legal systems integration",
            "Integración con sistemas legales",
        ),
    ],
    next_steps: &[
        Text::new(
            "Digital signature and evidence demo",
            "Demo de firma digital y evidencias",
        ),
        Text::new(
            "Legal requirements review",
            "Revisión legal de requisitos",
        ),
        Text::new(
            "Signature flow configuration",
            "Configuración de flujos de firma",
        ),
    ],
};
