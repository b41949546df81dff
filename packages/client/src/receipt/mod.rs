//! Participation certificate / fee receipt generation.
//!
//! Rendering is split into two phases so layout is testable and
//! deterministic: [`plan`] computes every draw operation and page break from
//! the registration snapshot alone, and [`pdf`] replays the plan into a PDF
//! byte buffer. Identical inputs (including the passed-in generation
//! timestamp) always produce identical page breaks.
//!
//! [`plan`]: plan::plan
//! [`pdf`]: pdf::render_plan

pub mod plan;
pub mod pdf;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use common::event::Event;
use common::participant::Participant;
use common::registration::Registration;
use common::team::Team;

use crate::error::Result;

/// Snapshot of everything the certificate shows.
pub struct ReceiptData<'a> {
    pub participant: &'a Participant,
    pub registrations: &'a [Registration],
    pub events: &'a [Event],
    pub team: Option<&'a Team>,
}

/// A fully rendered certificate, not yet written to disk.
pub struct RenderedReceipt {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RenderedReceipt {
    /// Writes the document under `dir`. Nothing is written unless rendering
    /// already succeeded in full.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Renders the participation certificate for a registration snapshot.
pub fn render(data: &ReceiptData<'_>, generated_at: DateTime<Utc>) -> Result<RenderedReceipt> {
    let document = plan::plan(data, generated_at);
    let bytes = pdf::render_plan(&document)?;
    let filename = format!(
        "Technovaganza_{}_{}.pdf",
        data.participant.pid,
        generated_at.timestamp_millis()
    );
    Ok(RenderedReceipt { filename, bytes })
}
