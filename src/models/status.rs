//! Vocabulario de estados
//!
//! Cada entidad (orden, pago, presupuesto, proyecto, revisión) guarda su estado
//! como texto libre. Aquí viven los flujos canónicos, los colores de
//! presentación y la proyección a porcentaje de progreso. Ningún cambio de
//! estado está prohibido: un operador puede escribir cualquier valor, y una
//! etiqueta desconocida cae en el color por defecto con progreso 0.

use serde::{Deserialize, Serialize};

/// Dominio de estado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusDomain {
    Order,
    Payment,
    Quote,
    Project,
    Revision,
}

/// Color/categoría visual de un estado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Blue,
    Amber,
    Yellow,
    Purple,
    Cyan,
    Orange,
    Accent,
    Red,
    Default,
}

/// Clasificación de un cambio de estado respecto al flujo canónico
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Forward,
    Backward,
    Unchanged,
    /// Alguno de los dos valores está fuera del flujo (cancelled, valor libre...)
    OffFlow,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Forward => "forward",
            TransitionKind::Backward => "backward",
            TransitionKind::Unchanged => "unchanged",
            TransitionKind::OffFlow => "off_flow",
        }
    }
}

const ORDER_FLOW: &[&str] = &["pending", "confirmed", "in_production", "shipped", "installing", "completed"];
const PAYMENT_FLOW: &[&str] = &["pending", "deposit_paid", "partially_paid", "paid"];
const QUOTE_FLOW: &[&str] = &["new", "contacted", "quoted", "approved", "in_progress", "completed"];
const PROJECT_FLOW: &[&str] = &["design", "revision", "approved", "printing", "shipping", "installing", "completed"];
const REVISION_FLOW: &[&str] = &["pending", "in_review", "in_progress", "completed"];

mod palette {
    use super::StatusColor::{self, *};

    pub const ORDER_COLORS: &[(&str, StatusColor)] = &[
        ("pending", Yellow),
        ("confirmed", Blue),
        ("in_production", Purple),
        ("shipped", Cyan),
        ("installing", Orange),
        ("completed", Green),
        ("cancelled", Red),
    ];

    pub const PAYMENT_COLORS: &[(&str, StatusColor)] = &[
        ("pending", Yellow),
        ("deposit_paid", Green),
        ("partially_paid", Yellow),
        ("paid", Green),
    ];

    pub const QUOTE_COLORS: &[(&str, StatusColor)] = &[
        ("new", Green),
        ("contacted", Blue),
        ("quoted", Amber),
        ("approved", Green),
        ("in_progress", Purple),
        ("completed", Default),
        ("cancelled", Red),
    ];

    pub const PROJECT_COLORS: &[(&str, StatusColor)] = &[
        ("design", Blue),
        ("revision", Amber),
        ("approved", Green),
        ("printing", Purple),
        ("shipping", Cyan),
        ("installing", Accent),
        ("completed", Default),
    ];

    pub const REVISION_COLORS: &[(&str, StatusColor)] = &[
        ("pending", Yellow),
        ("in_review", Blue),
        ("in_progress", Purple),
        ("completed", Green),
        ("rejected", Red),
    ];
}

use palette::*;

impl StatusDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusDomain::Order => "order",
            StatusDomain::Payment => "payment",
            StatusDomain::Quote => "quote",
            StatusDomain::Project => "project",
            StatusDomain::Revision => "revision",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "order" | "orders" => Some(StatusDomain::Order),
            "payment" | "payments" => Some(StatusDomain::Payment),
            "quote" | "quotes" => Some(StatusDomain::Quote),
            "project" | "projects" => Some(StatusDomain::Project),
            "revision" | "revisions" => Some(StatusDomain::Revision),
            _ => None,
        }
    }

    /// Flujo canónico, usado solo para el progreso y los botones avanzar/retroceder
    pub fn flow(&self) -> &'static [&'static str] {
        match self {
            StatusDomain::Order => ORDER_FLOW,
            StatusDomain::Payment => PAYMENT_FLOW,
            StatusDomain::Quote => QUOTE_FLOW,
            StatusDomain::Project => PROJECT_FLOW,
            StatusDomain::Revision => REVISION_FLOW,
        }
    }

    fn colors(&self) -> &'static [(&'static str, StatusColor)] {
        match self {
            StatusDomain::Order => ORDER_COLORS,
            StatusDomain::Payment => PAYMENT_COLORS,
            StatusDomain::Quote => QUOTE_COLORS,
            StatusDomain::Project => PROJECT_COLORS,
            StatusDomain::Revision => REVISION_COLORS,
        }
    }

    /// Estado con el que se inserta la entidad
    pub fn initial(&self) -> &'static str {
        self.flow()[0]
    }

    /// Etiquetas canónicas del dominio (flujo + estados terminales fuera de flujo)
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = self.flow().to_vec();
        labels.extend(self.off_flow_label());
        labels
    }

    fn off_flow_label(&self) -> Option<&'static str> {
        match self {
            StatusDomain::Order | StatusDomain::Quote => Some("cancelled"),
            StatusDomain::Payment => Some("refunded"),
            StatusDomain::Revision => Some("rejected"),
            StatusDomain::Project => None,
        }
    }

    pub fn is_canonical(&self, label: &str) -> bool {
        self.labels().contains(&label)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.flow().iter().position(|l| *l == label)
    }

    /// round((índice + 1) / largo × 100); etiqueta fuera del flujo => 0
    pub fn progress_percent(&self, label: &str) -> u8 {
        let len = self.flow().len();
        match self.position(label) {
            // redondeo half-up en enteros
            Some(index) => (((index + 1) * 200 + len) / (2 * len)) as u8,
            None => 0,
        }
    }

    pub fn color(&self, label: &str) -> StatusColor {
        self.colors()
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, c)| *c)
            .unwrap_or(StatusColor::Default)
    }

    pub fn next_status(&self, label: &str) -> Option<&'static str> {
        let index = self.position(label)?;
        self.flow().get(index + 1).copied()
    }

    pub fn previous_status(&self, label: &str) -> Option<&'static str> {
        let index = self.position(label)?;
        index.checked_sub(1).and_then(|i| self.flow().get(i).copied())
    }

    pub fn classify(&self, from: &str, to: &str) -> TransitionKind {
        if from == to {
            return TransitionKind::Unchanged;
        }
        match (self.position(from), self.position(to)) {
            (Some(a), Some(b)) if b > a => TransitionKind::Forward,
            (Some(_), Some(_)) => TransitionKind::Backward,
            _ => TransitionKind::OffFlow,
        }
    }

    pub fn view(&self, label: &str) -> StatusView {
        StatusView {
            status: label.to_string(),
            color: self.color(label),
            progress: self.progress_percent(label),
        }
    }
}

/// Estado listo para pintar (badge + barra de progreso)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub status: String,
    pub color: StatusColor,
    pub progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [StatusDomain; 5] = [
        StatusDomain::Order,
        StatusDomain::Payment,
        StatusDomain::Quote,
        StatusDomain::Project,
        StatusDomain::Revision,
    ];

    #[test]
    fn test_progress_endpoints() {
        for domain in ALL {
            let flow = domain.flow();
            let len = flow.len();
            assert_eq!(domain.progress_percent(flow[len - 1]), 100, "{:?}", domain);
            let expected_first = (100.0 / len as f64).round() as u8;
            assert_eq!(domain.progress_percent(flow[0]), expected_first, "{:?}", domain);
            assert_eq!(domain.progress_percent("teleported"), 0);
        }
    }

    #[test]
    fn test_project_progress_values() {
        let p = StatusDomain::Project;
        assert_eq!(p.progress_percent("design"), 14);
        assert_eq!(p.progress_percent("revision"), 29);
        assert_eq!(p.progress_percent("printing"), 57);
        assert_eq!(p.progress_percent("completed"), 100);
    }

    #[test]
    fn test_off_flow_labels_have_color_but_no_progress() {
        assert_eq!(StatusDomain::Quote.progress_percent("cancelled"), 0);
        assert_eq!(StatusDomain::Quote.color("cancelled"), StatusColor::Red);
        assert_eq!(StatusDomain::Order.color("cancelled"), StatusColor::Red);
        assert!(StatusDomain::Order.is_canonical("cancelled"));
        assert!(StatusDomain::Order.next_status("cancelled").is_none());
    }

    #[test]
    fn test_unknown_status_falls_back_to_default_color() {
        for domain in ALL {
            assert_eq!(domain.color("whatever_the_api_sent"), StatusColor::Default);
            assert_eq!(domain.color(""), StatusColor::Default);
        }
    }

    #[test]
    fn test_next_and_previous() {
        let q = StatusDomain::Quote;
        assert_eq!(q.next_status("new"), Some("contacted"));
        assert_eq!(q.next_status("completed"), None);
        assert_eq!(q.previous_status("new"), None);
        assert_eq!(q.previous_status("quoted"), Some("contacted"));
    }

    #[test]
    fn test_backward_transition_is_classified_not_rejected() {
        let p = StatusDomain::Project;
        assert_eq!(p.classify("design", "printing"), TransitionKind::Forward);
        assert_eq!(p.classify("completed", "design"), TransitionKind::Backward);
        assert_eq!(p.classify("design", "design"), TransitionKind::Unchanged);
        assert_eq!(p.classify("design", "on_hold"), TransitionKind::OffFlow);
    }

    #[test]
    fn test_initial_and_labels() {
        assert_eq!(StatusDomain::Order.initial(), "pending");
        assert_eq!(StatusDomain::Quote.initial(), "new");
        assert_eq!(StatusDomain::Project.initial(), "design");
        assert_eq!(StatusDomain::Revision.initial(), "pending");
        assert_eq!(StatusDomain::Payment.labels().last(), Some(&"refunded"));
        assert_eq!(StatusDomain::Project.labels().len(), 7);
        assert_eq!(StatusDomain::parse("quotes"), Some(StatusDomain::Quote));
        assert_eq!(StatusDomain::parse("invoices"), None);
    }
}
