//! Festival-wide constants shared by the client library and the CLI.

/// Maximum registrations a single participant may hold (solo + team combined).
pub const MAX_EVENTS_PER_USER: u32 = 3;

/// Default upper team-size bound for team events that don't specify one.
pub const MAX_TEAM_SIZE: u32 = 5;

/// Minimum PID length before a member validation is triggered automatically
/// while typing. Shorter input is only validated on blur or at submit.
pub const PID_AUTO_VALIDATE_LEN: usize = 10;

pub const FEST_TITLE: &str = "Technovaganza 2025";
pub const FEST_SUBTITLE: &str = "SRMS College of Engineering Technology and Research";
pub const DEFAULT_COLLEGE: &str = "SRMS College of Engineering & Technology";

pub const PAYMENT_NOTE: &str =
    "Please submit the registration fees at the Technovaganza Registration Counter";
pub const PAYMENT_COUNTER: &str = "Counter Location: Main Registration Desk in SRMS CET & R";
pub const PAYMENT_TIMING: &str = "Timing: 8:00 AM - 9:30 AM (sharp)";

pub const BRANCHES: &[&str] = &[
    "Computer Science & Engineering",
    "Information Technology",
    "Electronics & Communication Engineering",
    "Electrical Engineering",
    "Mechanical Engineering",
    "Civil Engineering",
    "Chemical Engineering",
    "Biotechnology",
    "CSE Cyber Security",
    "CSE AI/ML",
    "CSE Data Science",
    "BCA",
    "MCA",
    "MBA",
    "BBA",
    "B.Com",
    "B.Sc",
    "BHMCT",
    "MBBS",
    "BDS",
    "B.Pharma",
    "D.Pharma",
    "B.Sc Nursing",
    "GNM",
    "ANM",
    "Other",
];

pub const BATCHES: &[&str] = &["2020", "2021", "2022", "2023", "2024", "2025"];

pub const COLLEGES: &[&str] = &[
    "SRMS CET & R",
    "SRMS CET",
    "SRMS IMS",
    "SRMS Nursing",
    "SRMS IPS",
    "KCMT",
    "RBMI",
    "Invertis University",
    "MJPRU",
    "Future University",
    "SSVGI",
    "Rajshree Institute",
];
