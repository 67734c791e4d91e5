//! Constants used throughout the MomCare core crate.
//!
//! Defaults for configuration, fixed backend identifiers, and the user-facing labels the
//! screens share.

/// Base URL used when no explicit backend is configured (the local development backend).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/mevabe_api/";

/// Global HTTP timeout, applied to connect and to the whole request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory for the local key-value store when none is configured.
pub const DEFAULT_DATA_DIR: &str = ".momcare";

/// Filename of the local key-value store inside the data directory.
pub const LOCAL_STORE_FILENAME: &str = "app_pref.json";

/// Local store key holding the last known daily activities list.
pub const DAILY_ACTIVITIES_KEY: &str = "daily_activities";

/// The care provider every conversation is held with.
pub const CARE_PROVIDER_DOCTOR_ID: i64 = 1;

/// Sender tag for messages written by the mother.
pub const PATIENT_SENDER: &str = "u";

/// Name shown when the login response carries none.
pub const DEFAULT_DISPLAY_NAME: &str = "Mẹ Bầu";

/// The fixed set of daily prenatal-education activities, in display order.
pub const ACTIVITY_MASTER_LIST: [&str; 5] = [
    "📖 Kể chuyện",
    "🎵 Thai giáo âm thanh",
    "🎨 Nghệ thuật",
    "🎬 Xem phim",
    "💄 Làm đẹp",
];

pub const ACTIVITY_DONE_LABEL: &str = "Đã hoàn thành";
pub const ACTIVITY_PENDING_LABEL: &str = "Chưa hoàn thành";

/// Label of the manual retry control.
pub const RETRY_LABEL: &str = "Thử lại";
