//! Status presentation and action availability
//!
//! Every mapping here matches exhaustively on the status enums: adding a
//! status without deciding how it renders is a compile error.

use campus_api::types::{OrderStatus, TicketStatus};

/// Icon shown next to a status label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Waiting on the buyer
    Clock,
    /// Waiting on an admin
    Hourglass,
    /// Positive outcome
    CheckCircle,
    /// Negative outcome
    XCircle,
    /// Withdrawn
    Ban,
    /// Usable ticket
    Ticket,
}

/// Semantic colour of a status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Amber
    Warning,
    /// Blue
    Info,
    /// Green
    Success,
    /// Red
    Danger,
    /// Gray
    Neutral,
}

/// CSS classes for a tone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Background class
    pub background: &'static str,
    /// Text class
    pub text: &'static str,
    /// Border class
    pub border: &'static str,
}

impl Tone {
    /// Classes used to render this tone
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Warning => Palette {
                background: "bg-amber-50",
                text: "text-amber-800",
                border: "border-amber-200",
            },
            Self::Info => Palette {
                background: "bg-blue-50",
                text: "text-blue-800",
                border: "border-blue-200",
            },
            Self::Success => Palette {
                background: "bg-green-50",
                text: "text-green-800",
                border: "border-green-200",
            },
            Self::Danger => Palette {
                background: "bg-red-50",
                text: "text-red-800",
                border: "border-red-200",
            },
            Self::Neutral => Palette {
                background: "bg-gray-50",
                text: "text-gray-700",
                border: "border-gray-200",
            },
        }
    }
}

/// Label, icon and tone of one status value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusPresentation {
    /// Portuguese label
    pub label: &'static str,
    /// Icon
    pub icon: Icon,
    /// Colour
    pub tone: Tone,
}

/// Presentation of an order status
#[must_use]
pub const fn order_status(status: OrderStatus) -> StatusPresentation {
    match status {
        OrderStatus::PendingPayment => StatusPresentation {
            label: "Aguardando pagamento",
            icon: Icon::Clock,
            tone: Tone::Warning,
        },
        OrderStatus::AwaitingValidation => StatusPresentation {
            label: "Em validação",
            icon: Icon::Hourglass,
            tone: Tone::Info,
        },
        OrderStatus::Approved => StatusPresentation {
            label: "Aprovado",
            icon: Icon::CheckCircle,
            tone: Tone::Success,
        },
        OrderStatus::Rejected => StatusPresentation {
            label: "Rejeitado",
            icon: Icon::XCircle,
            tone: Tone::Danger,
        },
        OrderStatus::Cancelled => StatusPresentation {
            label: "Cancelado",
            icon: Icon::Ban,
            tone: Tone::Neutral,
        },
    }
}

/// Presentation of a ticket status
#[must_use]
pub const fn ticket_status(status: TicketStatus) -> StatusPresentation {
    match status {
        TicketStatus::Valid => StatusPresentation {
            label: "Válido",
            icon: Icon::Ticket,
            tone: Tone::Success,
        },
        TicketStatus::Used => StatusPresentation {
            label: "Utilizado",
            icon: Icon::CheckCircle,
            tone: Tone::Neutral,
        },
        TicketStatus::Cancelled => StatusPresentation {
            label: "Cancelado",
            icon: Icon::Ban,
            tone: Tone::Danger,
        },
    }
}

/// Buttons offered for an order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // One flag per button
pub struct OrderActions {
    /// Upload (or re-upload) a payment proof
    pub upload_proof: bool,
    /// Cancel the order
    pub cancel: bool,
    /// Open the issued ticket
    pub view_ticket: bool,
}

/// Buttons offered for an order, as a pure function of its status
#[must_use]
pub const fn order_actions(status: OrderStatus) -> OrderActions {
    match status {
        OrderStatus::PendingPayment => OrderActions {
            upload_proof: true,
            cancel: true,
            view_ticket: false,
        },
        OrderStatus::AwaitingValidation => OrderActions {
            upload_proof: false,
            cancel: true,
            view_ticket: false,
        },
        OrderStatus::Approved => OrderActions {
            upload_proof: false,
            cancel: false,
            view_ticket: true,
        },
        OrderStatus::Rejected => OrderActions {
            upload_proof: true,
            cancel: false,
            view_ticket: false,
        },
        OrderStatus::Cancelled => OrderActions {
            upload_proof: false,
            cancel: false,
            view_ticket: false,
        },
    }
}
