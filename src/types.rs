use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use tabled::Tabled;

/// One row of the bundled export, before any cleaning.
///
/// Values stay as raw JSON because the export changed shape over time
/// (flags as `"1"` strings vs `1` numbers, dates as serials vs text).
/// Columns not named here, including every equipment and demand flag,
/// land in `columns` and are resolved by the loader.
#[derive(Debug, Default, Deserialize)]
pub struct RawActivity {
    #[serde(rename = "DATA/HORA INÍCIO", alias = "DATA/HORA INICIO", default)]
    pub start: Option<Value>,
    #[serde(rename = "DATA/HORA \nFIM", alias = "DATA/HORA FIM", default)]
    pub end: Option<Value>,
    #[serde(rename = "TP \nSIGITM", alias = "TP SIGITM", default)]
    pub tp_sigitm: Option<Value>,
    #[serde(rename = "UDO ID", default)]
    pub udo_id: Option<Value>,
    #[serde(rename = "STATUS", default)]
    pub status: Option<Value>,
    #[serde(rename = "EVENTO", default)]
    pub event: Option<Value>,
    #[serde(rename = "SEVERIDADE", default)]
    pub severity: Option<Value>,
    #[serde(rename = "CRITICIDADE", default)]
    pub criticality: Option<Value>,
    #[serde(rename = "Executor da Atividade", default)]
    pub executor: Option<Value>,
    #[serde(rename = "Área Solicitante", alias = "Area Solicitante", default)]
    pub requester_area: Option<Value>,
    #[serde(rename = "Observações", default)]
    pub notes: Option<Value>,
    #[serde(rename = "ID DE BUSCA", default)]
    pub search_id: Option<Value>,
    #[serde(rename = "SEMANA", default)]
    pub week: Option<Value>,
    #[serde(rename = "DIA", default)]
    pub day: Option<Value>,
    #[serde(rename = "MÊS", alias = "MES", default)]
    pub month: Option<Value>,
    #[serde(rename = "ANO", default)]
    pub year: Option<Value>,
    #[serde(rename = "Execução - GLOBAL", default)]
    pub executed_global: Option<Value>,
    #[serde(rename = "Execução Plataforma BR", default)]
    pub executed_platform_br: Option<Value>,
    #[serde(rename = "Validação", default)]
    pub validation: Option<Value>,
    #[serde(flatten)]
    pub columns: HashMap<String, Value>,
}

/// Outcome recorded for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub enum Status {
    Success,
    Partial,
    Rollback,
    Authorized,
    Canceled,
    NotExecuted,
    PendingDocumentation,
    WorkOrderWithoutTicket,
    #[default]
    Unrecognized,
}

// Keys are upper-cased and trimmed. Both genders of the participle show up
// across export versions.
static STATUS_SPELLINGS: Lazy<HashMap<&'static str, Status>> = Lazy::new(|| {
    HashMap::from([
        ("REALIZADA COM SUCESSO", Status::Success),
        ("REALIZADO COM SUCESSO", Status::Success),
        ("REALIZADA PARCIALMENTE", Status::Partial),
        ("REALIZADO PARCIALMENTE", Status::Partial),
        ("REALIZADO ROLLBACK", Status::Rollback),
        ("REALIZADA ROLLBACK", Status::Rollback),
        ("AUTORIZADA", Status::Authorized),
        ("AUTORIZADO", Status::Authorized),
        ("CANCELADA", Status::Canceled),
        ("CANCELADO", Status::Canceled),
        ("NÃO EXECUTADO", Status::NotExecuted),
        ("NÃO EXECUTADA", Status::NotExecuted),
        ("PENDENTE DOCUMENTAÇÃO", Status::PendingDocumentation),
        ("PENDENTE DE DOCUMENTAÇÃO", Status::PendingDocumentation),
        ("WO EXECUTADA SEM GMUD", Status::WorkOrderWithoutTicket),
        ("WO EXECUTADO SEM GMUD", Status::WorkOrderWithoutTicket),
    ])
});

impl Status {
    pub const ALL: [Status; 9] = [
        Status::Success,
        Status::Partial,
        Status::Rollback,
        Status::Authorized,
        Status::Canceled,
        Status::NotExecuted,
        Status::PendingDocumentation,
        Status::WorkOrderWithoutTicket,
        Status::Unrecognized,
    ];

    pub fn parse(raw: &str) -> Status {
        let key = raw.trim().to_uppercase();
        STATUS_SPELLINGS
            .get(key.as_str())
            .copied()
            .unwrap_or(Status::Unrecognized)
    }

    /// Canonical spelling used when writing reports.
    pub fn label(self) -> &'static str {
        match self {
            Status::Success => "REALIZADA COM SUCESSO",
            Status::Partial => "REALIZADA PARCIALMENTE",
            Status::Rollback => "REALIZADO ROLLBACK",
            Status::Authorized => "AUTORIZADA",
            Status::Canceled => "CANCELADA",
            Status::NotExecuted => "NÃO EXECUTADO",
            Status::PendingDocumentation => "PENDENTE DOCUMENTAÇÃO",
            Status::WorkOrderWithoutTicket => "WO EXECUTADA SEM GMUD",
            Status::Unrecognized => "DESCONHECIDO",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Subsystem flag columns, in the order the dashboard lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Equipment {
    Freeview,
    TemporalEvent,
    NewChannels,
    NewCities,
    Vsa,
    Vspp,
    Rws,
    Scdn,
    Cdn,
    Fhr,
    Rhr,
    Scr,
    Rdv,
    Dvb,
    Swp,
    Opch,
    Devices,
    Database,
    OtherConfiguration,
    Documentation,
    Task,
}

impl Equipment {
    pub const ALL: [Equipment; 21] = [
        Equipment::Freeview,
        Equipment::TemporalEvent,
        Equipment::NewChannels,
        Equipment::NewCities,
        Equipment::Vsa,
        Equipment::Vspp,
        Equipment::Rws,
        Equipment::Scdn,
        Equipment::Cdn,
        Equipment::Fhr,
        Equipment::Rhr,
        Equipment::Scr,
        Equipment::Rdv,
        Equipment::Dvb,
        Equipment::Swp,
        Equipment::Opch,
        Equipment::Devices,
        Equipment::Database,
        Equipment::OtherConfiguration,
        Equipment::Documentation,
        Equipment::Task,
    ];

    /// Column name in the export.
    pub fn label(self) -> &'static str {
        match self {
            Equipment::Freeview => "Freeview",
            Equipment::TemporalEvent => "Evento Temporal",
            Equipment::NewChannels => "Novos Canais",
            Equipment::NewCities => "Novas Cidades",
            Equipment::Vsa => "VSA",
            Equipment::Vspp => "VSPP",
            Equipment::Rws => "RWs",
            Equipment::Scdn => "SCDN",
            Equipment::Cdn => "CDN",
            Equipment::Fhr => "FHR",
            Equipment::Rhr => "RHR",
            Equipment::Scr => "SCR",
            Equipment::Rdv => "RDV",
            Equipment::Dvb => "DVB",
            Equipment::Swp => "SWP",
            Equipment::Opch => "OPCH",
            Equipment::Devices => "Dispositivos",
            Equipment::Database => "Base de dados",
            Equipment::OtherConfiguration => "Outras Configurações",
            Equipment::Documentation => "Documentação",
            Equipment::Task => "TAREFA (TASK)",
        }
    }

    /// Case-insensitive lookup by column name, as used by the drill-down path.
    pub fn from_label(name: &str) -> Option<Equipment> {
        let wanted = name.trim().to_lowercase();
        Equipment::ALL
            .into_iter()
            .find(|e| e.label().to_lowercase() == wanted)
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// "Demanda - ..." flag columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DemandSource {
    Global,
    Platform,
    Marketing,
    Engineering,
}

impl DemandSource {
    pub const ALL: [DemandSource; 4] = [
        DemandSource::Global,
        DemandSource::Platform,
        DemandSource::Marketing,
        DemandSource::Engineering,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DemandSource::Global => "Demanda - Global",
            DemandSource::Platform => "Demanda - Plataforma",
            DemandSource::Marketing => "Demanda - MKT Conteúdos",
            DemandSource::Engineering => "Demanda - Engenharia",
        }
    }
}

/// Organizational unit that requested an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Area {
    Engineering,
    Marketing,
    Platform,
    FrontOffice,
}

impl Area {
    pub const ALL: [Area; 4] = [
        Area::Engineering,
        Area::Marketing,
        Area::Platform,
        Area::FrontOffice,
    ];

    /// Accepted values of "Área Solicitante", upper-cased.
    pub fn spellings(self) -> &'static [&'static str] {
        match self {
            Area::Engineering => &["ENGENHARIA"],
            Area::Marketing => &["MARKETING", "MKT CONTEÚDOS", "MKT CONTEUDOS", "MKT"],
            Area::Platform => &["PLATAFORMA", "PLATAFORMA BR"],
            Area::FrontOffice => &["FRONT OFFICE", "FRONT-OFFICE", "FRONTOFFICE"],
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Area::Engineering => "engenharia",
            Area::Marketing => "marketing",
            Area::Platform => "plataforma",
            Area::FrontOffice => "front-office",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Area::Engineering => "Engenharia",
            Area::Marketing => "Marketing",
            Area::Platform => "Plataforma",
            Area::FrontOffice => "Front Office",
        }
    }

    pub fn matches(self, requester_area: &str) -> bool {
        let value = requester_area.trim().to_uppercase();
        self.spellings().iter().any(|s| *s == value)
    }

    /// Resolve a slug, English name or any accepted spelling.
    pub fn from_name(name: &str) -> Option<Area> {
        let lowered = name.trim().to_lowercase();
        Area::ALL.into_iter().find(|a| {
            a.slug() == lowered
                || format!("{:?}", a).to_lowercase() == lowered
                || a.matches(name)
        })
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActivityKind {
    Task,
    WorkOrder,
}

/// Canonical activity after the loader has reconciled every export version.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Activity {
    pub search_id: String,
    pub udo_id: String,
    pub tp_sigitm: String,
    pub start_raw: String,
    pub start_date: Option<NaiveDate>,
    pub start_display: String,
    pub end_display: String,
    pub week: Option<u32>,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub status: Status,
    pub status_raw: String,
    pub severity: String,
    pub criticality: String,
    pub requester_area: String,
    pub executor: String,
    pub event: String,
    pub notes: String,
    pub validation: String,
    pub equipment: BTreeSet<Equipment>,
    pub demand: BTreeSet<DemandSource>,
    pub is_task: bool,
    pub executed_global: bool,
    pub executed_platform_br: bool,
}

impl Activity {
    pub fn has_equipment(&self, equipment: Equipment) -> bool {
        self.equipment.contains(&equipment)
    }

    pub fn kind(&self) -> ActivityKind {
        if self.is_task {
            ActivityKind::Task
        } else {
            ActivityKind::WorkOrder
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct EquipmentRow {
    #[serde(rename = "Equipment")]
    #[tabled(rename = "Equipment")]
    pub equipment: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: usize,
    #[serde(rename = "Percentage")]
    #[tabled(rename = "Percentage")]
    pub percentage: String,
    #[serde(rename = "Level")]
    #[tabled(rename = "Level")]
    pub level: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MonthlyRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: usize,
    #[serde(rename = "Success")]
    #[tabled(rename = "Success")]
    pub success: usize,
    #[serde(rename = "Partial")]
    #[tabled(rename = "Partial")]
    pub partial: usize,
    #[serde(rename = "Rollback")]
    #[tabled(rename = "Rollback")]
    pub rollback: usize,
    #[serde(rename = "Canceled")]
    #[tabled(rename = "Canceled")]
    pub canceled: usize,
    #[serde(rename = "NotExecuted")]
    #[tabled(rename = "NotExecuted")]
    pub not_executed: usize,
    #[serde(rename = "Authorized")]
    #[tabled(rename = "Authorized")]
    pub authorized: usize,
    #[serde(rename = "PendingDoc")]
    #[tabled(rename = "PendingDoc")]
    pub pending_documentation: usize,
    #[serde(rename = "WoWithoutTicket")]
    #[tabled(rename = "WoWithoutTicket")]
    pub work_order_without_ticket: usize,
    #[serde(rename = "SuccessRate")]
    #[tabled(rename = "SuccessRate")]
    pub success_rate: String,
    #[serde(rename = "CancelPct")]
    #[tabled(rename = "CancelPct")]
    pub cancel_pct: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct GlobalMonthRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: usize,
    #[serde(rename = "Success")]
    #[tabled(rename = "Success")]
    pub success: usize,
    #[serde(rename = "Failed")]
    #[tabled(rename = "Failed")]
    pub failed: usize,
    #[serde(rename = "SuccessRate")]
    #[tabled(rename = "SuccessRate")]
    pub success_rate: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DemandRow {
    #[serde(rename = "Demand")]
    #[tabled(rename = "Demand")]
    pub demand: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: usize,
    #[serde(rename = "Success")]
    #[tabled(rename = "Success")]
    pub success: usize,
    #[serde(rename = "Canceled")]
    #[tabled(rename = "Canceled")]
    pub canceled: usize,
    #[serde(rename = "SuccessRate")]
    #[tabled(rename = "SuccessRate")]
    pub success_rate: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ActivityRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "SearchId")]
    #[tabled(rename = "SearchId")]
    pub search_id: String,
    #[serde(rename = "Event")]
    #[tabled(rename = "Event")]
    pub event: String,
    #[serde(rename = "Area")]
    #[tabled(rename = "Area")]
    pub area: String,
    #[serde(rename = "Executor")]
    #[tabled(rename = "Executor")]
    pub executor: String,
    #[serde(rename = "Severity")]
    #[tabled(rename = "Severity")]
    pub severity: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&Activity> for ActivityRow {
    fn from(a: &Activity) -> Self {
        ActivityRow {
            date: a.start_display.clone(),
            search_id: a.search_id.clone(),
            event: a.event.clone(),
            area: a.requester_area.clone(),
            executor: a.executor.clone(),
            severity: a.severity.clone(),
            status: a.status_raw.clone(),
        }
    }
}
