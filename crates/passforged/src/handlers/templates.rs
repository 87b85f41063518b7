use axum::Json;
use serde::Serialize;

/// Entry in the fixed template catalog the UI renders as a gallery.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub default_color: &'static str,
}

pub async fn handler() -> Json<Vec<TemplateDescriptor>> {
    Json(vec![
        TemplateDescriptor {
            id: "loyalty",
            name: "Loyalty Card",
            description: "Store loyalty and membership cards",
            icon: "store",
            default_color: "#1a1a2e",
        },
        TemplateDescriptor {
            id: "event",
            name: "Event Ticket",
            description: "Concert, sports, and event tickets",
            icon: "ticket",
            default_color: "#0f3460",
        },
        TemplateDescriptor {
            id: "boarding",
            name: "Boarding Pass",
            description: "Flight and transit boarding passes",
            icon: "plane",
            default_color: "#16213e",
        },
        TemplateDescriptor {
            id: "coupon",
            name: "Coupon",
            description: "Discounts and promotional offers",
            icon: "percent",
            default_color: "#533483",
        },
        TemplateDescriptor {
            id: "generic",
            name: "Generic Pass",
            description: "ID cards, gym memberships, library cards",
            icon: "card",
            default_color: "#2d3748",
        },
    ])
}
