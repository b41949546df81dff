//! Pure layout phase: turns a registration snapshot into draw operations
//! with explicit page breaks.
//!
//! Coordinates are top-down millimetres on an A4 page; the draw phase flips
//! them into PDF space. Each block checks remaining vertical space against
//! its own threshold before writing, and a break re-emits the continuation
//! banner and content frame. The payment and footer blocks are anchored to
//! the bottom of the final page; space for them is reserved by pushing the
//! cursor to a fresh page if body content has intruded into the reserve.

use chrono::{DateTime, Utc};

use common::constants::{
    DEFAULT_COLLEGE, FEST_SUBTITLE, FEST_TITLE, PAYMENT_COUNTER, PAYMENT_NOTE, PAYMENT_TIMING,
};
use common::fee::calculate_amount;
use common::registration::Registration;

use super::ReceiptData;

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

/// Top of the bottom-anchored payment box.
const PAYMENT_TOP: f64 = PAGE_HEIGHT - 70.0;
/// Cursor position after a page break.
const CONTINUED_TOP: f64 = 50.0;

const MM_PER_PT: f64 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

pub const RED: Rgb8 = Rgb8(220, 53, 69);
pub const WHITE: Rgb8 = Rgb8(255, 255, 255);
pub const PAGE_BG: Rgb8 = Rgb8(248, 249, 250);
pub const DARK: Rgb8 = Rgb8(51, 51, 51);
pub const GRAY: Rgb8 = Rgb8(102, 102, 102);
pub const LIGHT_GRAY: Rgb8 = Rgb8(200, 200, 200);
pub const GREEN: Rgb8 = Rgb8(39, 174, 96);
pub const PAYMENT_BG: Rgb8 = Rgb8(255, 243, 205);
pub const PAYMENT_BORDER: Rgb8 = Rgb8(255, 193, 7);
pub const PAYMENT_TEXT: Rgb8 = Rgb8(133, 100, 4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Align {
    Left,
    Center,
}

/// One draw operation. `y` is the top-down coordinate of the op's anchor.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb8,
        filled: bool,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Rgb8,
        thickness: f64,
    },
    Text {
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        color: Rgb8,
        align: Align,
        content: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PagePlan {
    pub ops: Vec<Op>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub pages: Vec<PagePlan>,
}

/// Approximate rendered width of Helvetica text, in millimetres. Good
/// enough for the label/value offsets and centering the original layout
/// computes from exact font metrics.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.5 * MM_PER_PT
}

struct PlanWriter {
    pages: Vec<PagePlan>,
    y: f64,
}

impl PlanWriter {
    fn new() -> Self {
        let mut writer = Self {
            pages: vec![PagePlan::default()],
            y: 90.0,
        };
        writer.first_page_chrome();
        writer
    }

    fn op(&mut self, op: Op) {
        // A page always exists; the writer starts with one.
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn filled_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb8) {
        self.op(Op::Rect {
            x,
            y,
            width,
            height,
            color,
            filled: true,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb8) {
        self.op(Op::Rect {
            x,
            y,
            width,
            height,
            color,
            filled: false,
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgb8, thickness: f64) {
        self.op(Op::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
        });
    }

    fn text(&mut self, x: f64, y: f64, size: f64, bold: bool, color: Rgb8, content: &str) {
        self.op(Op::Text {
            x,
            y,
            size,
            bold,
            color,
            align: Align::Left,
            content: content.to_string(),
        });
    }

    fn centered(&mut self, y: f64, size: f64, bold: bool, color: Rgb8, content: &str) {
        self.op(Op::Text {
            x: PAGE_WIDTH / 2.0,
            y,
            size,
            bold,
            color,
            align: Align::Center,
            content: content.to_string(),
        });
    }

    fn first_page_chrome(&mut self) {
        self.filled_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, PAGE_BG);
        self.filled_rect(0.0, 0.0, PAGE_WIDTH, 40.0, RED);
        self.centered(20.0, 24.0, true, WHITE, FEST_TITLE);
        self.centered(30.0, 12.0, false, WHITE, FEST_SUBTITLE);

        self.filled_rect(15.0, 50.0, PAGE_WIDTH - 30.0, PAGE_HEIGHT - 100.0, WHITE);
        self.stroke_rect(15.0, 50.0, PAGE_WIDTH - 30.0, PAGE_HEIGHT - 100.0, RED);

        self.centered(70.0, 20.0, true, RED, "PARTICIPATION CERTIFICATE");
        self.line(50.0, 75.0, PAGE_WIDTH - 50.0, 75.0, RED, 0.8);
    }

    fn new_page(&mut self) {
        self.pages.push(PagePlan::default());
        self.filled_rect(0.0, 0.0, PAGE_WIDTH, 15.0, RED);
        self.centered(
            8.0,
            10.0,
            true,
            WHITE,
            "Technovaganza 2025 - Participation Certificate (Continued)",
        );
        self.y = CONTINUED_TOP;
    }

    /// Starts a new page unless at least `reserve` millimetres remain below
    /// the cursor.
    fn ensure_space(&mut self, reserve: f64) {
        if self.y > PAGE_HEIGHT - reserve {
            self.new_page();
        }
    }

    fn section_header(&mut self, title: &str) {
        self.text(25.0, self.y, 14.0, true, DARK, title);
        self.y += 10.0;
        self.line(25.0, self.y, PAGE_WIDTH - 25.0, self.y, LIGHT_GRAY, 0.2);
        self.y += 15.0;
    }

    /// `Label: value` row at the detail indent, value colored per caller.
    fn labelled_row(&mut self, label: &str, value: &str, value_color: Rgb8, value_bold: bool) {
        self.text(30.0, self.y, 10.0, true, GRAY, &format!("{label}:"));
        let value_x = 30.0 + text_width(&format!("{label}: "), 10.0) + 5.0;
        self.op(Op::Text {
            x: value_x,
            y: self.y,
            size: 10.0,
            bold: value_bold,
            color: value_color,
            align: Align::Left,
            content: value.to_string(),
        });
        self.y += 8.0;
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Computes the full document layout for a registration snapshot.
pub fn plan(data: &ReceiptData<'_>, generated_at: DateTime<Utc>) -> DocumentPlan {
    let events_count = data.registrations.len() as u32;
    let amount = calculate_amount(events_count);

    let mut w = PlanWriter::new();

    // Participant information.
    w.section_header("PARTICIPANT INFORMATION");
    let participant = data.participant;
    let college = participant.college.as_deref().unwrap_or(DEFAULT_COLLEGE);
    let rows = [
        ("Participant ID", participant.pid.clone()),
        ("Name", participant.name.clone()),
        ("Roll Number", participant.rollno.clone()),
        ("Branch", participant.branch.clone()),
        ("Batch", participant.batch.clone()),
        ("College", college.to_string()),
        ("Total Events", format!("{events_count} events")),
        ("Amount to Pay", format!("Rs. {amount}")),
    ];
    for (label, value) in rows {
        w.ensure_space(120.0);
        if label == "Amount to Pay" {
            w.labelled_row(label, &value, GREEN, true);
        } else {
            w.labelled_row(label, &value, DARK, false);
        }
    }
    w.y += 10.0;

    // Team information, for team registrations only.
    if let Some(team) = data.team {
        w.ensure_space(150.0);
        w.section_header("TEAM INFORMATION");
        w.labelled_row("Team ID", &team.tid, DARK, false);
        w.labelled_row("Team Name", &team.team_name, DARK, false);
        w.y += 7.0;

        w.text(30.0, w.y, 10.0, true, DARK, "TEAM MEMBERS:");
        w.y += 8.0;
        for (index, member) in team.members.iter().enumerate() {
            w.ensure_space(80.0);
            let line = format!(
                "{}. {} ({}) - {}",
                index + 1,
                member.name,
                member.pid,
                member.branch
            );
            w.text(35.0, w.y, 10.0, false, DARK, &line);
            w.y += 7.0;
        }
        w.y += 10.0;
    }

    // Registered events.
    w.ensure_space(200.0);
    w.section_header("REGISTERED EVENTS");
    for (index, registration) in data.registrations.iter().enumerate() {
        w.ensure_space(80.0);
        write_event_block(&mut w, index, registration, data);
    }

    // Bottom-anchored blocks. If body content intruded into the reserve the
    // payment box moves to a fresh final page instead of overlapping.
    if w.y > PAYMENT_TOP {
        w.new_page();
    }
    write_payment_block(&mut w, events_count, amount);
    write_footer(&mut w, generated_at);

    DocumentPlan { pages: w.pages }
}

fn write_event_block(
    w: &mut PlanWriter,
    index: usize,
    registration: &Registration,
    data: &ReceiptData<'_>,
) {
    let event = data
        .events
        .iter()
        .find(|e| e.id == registration.event_id.id());

    let name = event.map(|e| e.name.as_str()).unwrap_or("Event");
    let badge = registration.event_type.as_str().to_uppercase();
    w.text(
        30.0,
        w.y,
        9.0,
        true,
        RED,
        &format!("{}. {name} [{badge}]", index + 1),
    );
    w.y += 6.0;

    let description = event
        .map(|e| e.description.as_str())
        .filter(|d| !d.is_empty())
        .unwrap_or("N/A");
    let mut details = vec![
        format!("Description: {description}"),
        format!("Type: {}", registration.event_type.as_str()),
    ];
    if let Some(team_id) = &registration.team_id {
        details.push(format!("Team ID: {team_id}"));
    }
    if let Some(date) = event.and_then(|e| e.date.as_ref()) {
        details.push(format!("Event Date: {}", format_date(date)));
    }
    if let Some(time) = event.and_then(|e| e.time.as_deref()) {
        details.push(format!("Event Time: {time}"));
    }
    if let Some(venue) = event.and_then(|e| e.venue.as_deref()) {
        details.push(format!("Venue: {venue}"));
    }
    if let Some(fee) = event.map(|e| e.amount).filter(|a| *a > 0) {
        details.push(format!("Event Fee: Rs. {fee}"));
    }
    details.push(format!(
        "Registration Date: {}",
        format_date(&registration.registration_date)
    ));

    for detail in details {
        w.ensure_space(50.0);
        w.text(35.0, w.y, 9.0, false, GRAY, &detail);
        w.y += 5.0;
    }
    w.y += 8.0;
}

fn write_payment_block(w: &mut PlanWriter, events_count: u32, amount: u32) {
    w.filled_rect(20.0, PAYMENT_TOP, PAGE_WIDTH - 40.0, 50.0, PAYMENT_BG);
    w.stroke_rect(20.0, PAYMENT_TOP, PAGE_WIDTH - 40.0, 50.0, PAYMENT_BORDER);

    w.centered(PAYMENT_TOP + 8.0, 12.0, true, PAYMENT_TEXT, "PAYMENT INFORMATION");
    w.centered(
        PAYMENT_TOP + 18.0,
        9.0,
        true,
        PAYMENT_TEXT,
        &format!("Total Events Registered: {events_count}"),
    );
    w.centered(
        PAYMENT_TOP + 26.0,
        9.0,
        true,
        GREEN,
        &format!("Total Amount to be Paid: Rs. {amount}"),
    );
    w.centered(PAYMENT_TOP + 34.0, 9.0, false, PAYMENT_TEXT, PAYMENT_NOTE);
    w.centered(PAYMENT_TOP + 40.0, 9.0, false, PAYMENT_TEXT, PAYMENT_COUNTER);
    w.centered(PAYMENT_TOP + 46.0, 9.0, false, PAYMENT_TEXT, PAYMENT_TIMING);
}

fn write_footer(w: &mut PlanWriter, generated_at: DateTime<Utc>) {
    let footer_y = PAGE_HEIGHT - 15.0;
    w.line(25.0, footer_y, PAGE_WIDTH - 25.0, footer_y, RED, 0.5);
    w.centered(
        footer_y + 5.0,
        8.0,
        false,
        GRAY,
        &format!("Generated on: {}", format_date(&generated_at)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    use common::event::{Event, EventType};
    use common::participant::Participant;
    use common::registration::EventRef;
    use common::team::{MemberProfile, Team};

    fn participant() -> Participant {
        Participant {
            pid: "TECH25A00042".into(),
            name: "Asha Verma".into(),
            rollno: "2201341".into(),
            branch: "Information Technology".into(),
            batch: "2024".into(),
            college: Some("SRMS CET & R".into()),
            registered_events: Vec::new(),
            events_count: 0,
        }
    }

    fn event(id: &str) -> Event {
        Event {
            id: id.into(),
            name: format!("Event {id}"),
            description: "A festival event with a reasonably long description".into(),
            event_type: EventType::Solo,
            date: Some(Utc.with_ymd_and_hms(2025, 10, 18, 0, 0, 0).unwrap()),
            time: Some("10:00 AM".into()),
            venue: Some("Main Hall".into()),
            amount: 20,
            max_participants: 100,
            current_participants: 10,
            min_team_size: None,
            max_team_size: None,
            is_active: true,
        }
    }

    fn registration(event_id: &str) -> Registration {
        Registration {
            event_id: EventRef::Id(event_id.into()),
            event_type: EventType::Solo,
            team_id: None,
            registration_date: Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap(),
        }
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 2, 12, 0, 0).unwrap()
    }

    fn texts(plan: &DocumentPlan) -> Vec<&str> {
        plan.pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                Op::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn four_registrations_show_saturated_fee_and_all_events_in_order() {
        let p = participant();
        let events: Vec<_> = (1..=4).map(|i| event(&format!("ev{i}"))).collect();
        let regs: Vec<_> = (1..=4).map(|i| registration(&format!("ev{i}"))).collect();
        let data = ReceiptData {
            participant: &p,
            registrations: &regs,
            events: &events,
            team: None,
        };

        let doc = plan(&data, generated_at());
        let texts = texts(&doc);

        assert!(texts.contains(&"Total Amount to be Paid: Rs. 120"));

        let headers: Vec<_> = texts
            .iter()
            .filter(|t| t.contains("[SOLO]"))
            .cloned()
            .collect();
        assert_eq!(
            headers,
            vec![
                "1. Event ev1 [SOLO]",
                "2. Event ev2 [SOLO]",
                "3. Event ev3 [SOLO]",
                "4. Event ev4 [SOLO]",
            ]
        );
    }

    #[test]
    fn plan_is_deterministic() {
        let p = participant();
        let events: Vec<_> = (1..=3).map(|i| event(&format!("ev{i}"))).collect();
        let regs: Vec<_> = (1..=3).map(|i| registration(&format!("ev{i}"))).collect();
        let data = ReceiptData {
            participant: &p,
            registrations: &regs,
            events: &events,
            team: None,
        };

        assert_eq!(plan(&data, generated_at()), plan(&data, generated_at()));
    }

    #[test]
    fn long_event_lists_break_onto_continuation_pages() {
        let p = participant();
        let events: Vec<_> = (1..=12).map(|i| event(&format!("ev{i}"))).collect();
        let regs: Vec<_> = (1..=12).map(|i| registration(&format!("ev{i}"))).collect();
        let data = ReceiptData {
            participant: &p,
            registrations: &regs,
            events: &events,
            team: None,
        };

        let doc = plan(&data, generated_at());
        assert!(doc.pages.len() > 1, "expected a page break");

        // Continuation pages open with the 15mm banner.
        for page in &doc.pages[1..] {
            assert!(matches!(
                page.ops.first(),
                Some(Op::Rect { y, height, .. }) if *y == 0.0 && *height == 15.0
            ));
        }

        // Body rows never intrude into the bottom reserve on any page.
        let footer_texts = ["Generated on", "PAYMENT INFORMATION", "Total "];
        for page in &doc.pages {
            for op in &page.ops {
                if let Op::Text { y, content, .. } = op {
                    let is_anchored = *y >= PAYMENT_TOP
                        || footer_texts.iter().any(|f| content.starts_with(f))
                        || content.starts_with("Please submit")
                        || content.starts_with("Counter Location")
                        || content.starts_with("Timing:");
                    if !is_anchored {
                        assert!(
                            *y <= PAGE_HEIGHT - 50.0 + f64::EPSILON,
                            "body text at y={y} intrudes into bottom reserve: {content}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn payment_block_lands_on_the_final_page_only() {
        let p = participant();
        let events: Vec<_> = (1..=12).map(|i| event(&format!("ev{i}"))).collect();
        let regs: Vec<_> = (1..=12).map(|i| registration(&format!("ev{i}"))).collect();
        let data = ReceiptData {
            participant: &p,
            registrations: &regs,
            events: &events,
            team: None,
        };

        let doc = plan(&data, generated_at());
        for (index, page) in doc.pages.iter().enumerate() {
            let has_payment = page.ops.iter().any(|op| {
                matches!(op, Op::Text { content, .. } if content == "PAYMENT INFORMATION")
            });
            assert_eq!(has_payment, index == doc.pages.len() - 1);
        }
    }

    #[test]
    fn team_block_appears_only_with_team_data() {
        let p = participant();
        let events = vec![event("ev1")];
        let regs = vec![registration("ev1")];
        let team = Team {
            tid: "TEAM01".into(),
            team_name: "Null Pointers".into(),
            event_id: Some("ev1".into()),
            leader: Some("TECH25A00042".into()),
            members: vec![MemberProfile {
                pid: "TECH25A00043".into(),
                name: "Ravi Kumar".into(),
                branch: "CSE AI/ML".into(),
                events_count: 1,
            }],
        };

        let without = plan(
            &ReceiptData {
                participant: &p,
                registrations: &regs,
                events: &events,
                team: None,
            },
            generated_at(),
        );
        assert!(!texts(&without).contains(&"TEAM INFORMATION"));

        let with = plan(
            &ReceiptData {
                participant: &p,
                registrations: &regs,
                events: &events,
                team: Some(&team),
            },
            generated_at(),
        );
        let texts = texts(&with);
        assert!(texts.contains(&"TEAM INFORMATION"));
        assert!(texts.contains(&"1. Ravi Kumar (TECH25A00043) - CSE AI/ML"));
    }

    #[test]
    fn zero_registrations_still_render_with_zero_fee() {
        let p = participant();
        let data = ReceiptData {
            participant: &p,
            registrations: &[],
            events: &[],
            team: None,
        };
        let doc = plan(&data, generated_at());
        // The events section reserves more room than the participant block
        // leaves, so it always opens on a fresh page.
        assert_eq!(doc.pages.len(), 2);
        assert!(texts(&doc).contains(&"Total Amount to be Paid: Rs. 0"));
    }
}
