// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned entities for tests.
//!
//! Timestamps are fixed so assertions on serialized rows stay deterministic.

use chrono::{DateTime, NaiveDate, Utc};

use ritmo_core::{
    Approval, ApprovalStatus, ApprovalSummary, BrandDna, Campaign, CampaignId, CampaignStatus,
    Client, ClientId, ClientStatus, Platform, PostId, PostStatus, Priority, RequestId,
    ScheduledPost, Specialist,
};

/// The reference instant used across fixtures.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// An active client.
pub fn client(id: &str, name: &str) -> Client {
    Client {
        id: ClientId(id.to_string()),
        name: name.to_string(),
        industry: "Tecnología / Software".to_string(),
        website: Some("https://example.com".to_string()),
        logo_url: None,
        brief: Some("Cliente de prueba para la consola.".to_string()),
        status: ClientStatus::Active,
        created_at: fixed_now(),
        updated_at: fixed_now(),
        version: 1,
    }
}

/// A draft campaign spanning March 2026.
pub fn campaign(id: &str, client_id: &str, name: &str) -> Campaign {
    Campaign {
        id: CampaignId(id.to_string()),
        client_id: ClientId(client_id.to_string()),
        name: name.to_string(),
        objective: "Aumentar awareness de la marca".to_string(),
        platforms: vec![Platform::Instagram, Platform::Facebook],
        budget: Some(1500.0),
        status: CampaignStatus::Draft,
        start_date: NaiveDate::from_ymd_opt(2026, 3, 1),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 26),
        idempotency_key: None,
        created_at: fixed_now(),
        version: 1,
    }
}

/// A draft post scheduled for the given date.
pub fn scheduled_post(id: &str, client_id: &str, date: NaiveDate) -> ScheduledPost {
    ScheduledPost {
        id: PostId(id.to_string()),
        client_id: ClientId(client_id.to_string()),
        campaign_id: None,
        content: "Contenido de prueba".to_string(),
        platform: Platform::Instagram,
        scheduled_date: date,
        status: PostStatus::Scheduled,
        created_at: fixed_now(),
        version: 1,
    }
}

/// A pending approval-queue item with a card summary.
pub fn approval(request_id: &str, client_id: &str, priority: Priority) -> Approval {
    Approval {
        request_id: RequestId(request_id.to_string()),
        client_id: ClientId(client_id.to_string()),
        bot: "brand-strategist".to_string(),
        priority,
        status: ApprovalStatus::Pending,
        summary: ApprovalSummary::Card {
            title: "Aprobar Brand DNA".to_string(),
            description: "Revisión del perfil de marca generado.".to_string(),
        },
        submitted_at: fixed_now(),
        decided_at: None,
        decided_by: None,
        comments: None,
        version: 1,
    }
}

/// A generated brand-DNA artifact awaiting approval.
pub fn brand_dna(client_id: &str) -> BrandDna {
    BrandDna {
        client_id: ClientId(client_id.to_string()),
        essence: "Innovación accesible".to_string(),
        tone: "Cercano y profesional".to_string(),
        positioning: "Líder regional en su categoría".to_string(),
        target_audience: "PyMEs en crecimiento".to_string(),
        visual_style: "Limpio, colores cálidos".to_string(),
        narrative: "La marca acompaña a sus clientes en cada etapa.".to_string(),
        differentiation: "Atención personalizada con tecnología propia".to_string(),
        quality_score: 87,
        approved: false,
        content_hash: "a1b2c3d4".to_string(),
        created_at: fixed_now(),
    }
}

/// A specialist roster entry.
pub fn specialist(id: &str, name: &str, role: &str) -> Specialist {
    Specialist {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        status: Some("online".to_string()),
    }
}
