//! Endpoint paths, relative to the API base URL (which ends in `/mevabe_api/`).

/// Path segment the backend mounts every endpoint under.
pub const API_PREFIX: &str = "mevabe_api";

pub const LOGIN: &str = "login.php";
pub const REGISTER: &str = "register.php";

pub const VISITS_LIST: &str = "so_kham_thai_get.php";
pub const VISITS_ADD: &str = "so_kham_thai_add.php";
pub const VISITS_UPDATE: &str = "so_kham_thai_update.php";
pub const VISITS_DELETE: &str = "so_kham_thai_delete.php";

pub const GROWTH_LIST: &str = "get_pregnancy_info.php";
pub const PREGNANCY_GET: &str = "get_pregnancy.php";
pub const PREGNANCY_SAVE: &str = "save_pregnancy.php";
pub const PREGNANCY_ADD: &str = "pregnancy_add.php";

pub const VACCINATIONS_LIST: &str = "getVaccinations.php";
pub const VACCINATION_UPDATE: &str = "updateVaccination.php";

pub const ACTIVITIES_DAILY: &str = "get_daily_activities.php";
pub const ACTIVITY_SAVE: &str = "save_activity.php";
pub const ACTIVITY_COMPLETION: &str = "get_completion.php";
pub const ACTIVITY_DAY_INDEX: &str = "get_activity_day_index.php";

pub const BIRTH_PLAN_QUESTIONS: &str = "birth_plan_questions.php";
pub const BIRTH_PLAN_SAVE: &str = "save_birth_plan_selection.php";

pub const CHAT_MESSAGES: &str = "get_messages.php";
pub const CHAT_SEND: &str = "send_message.php";

pub const CRISIS_WEEKS: &str = "get_crisis_week_info.php";
pub const FOOD_POSTS: &str = "get_nutrition_posts.php";
pub const REFERENCE_PRODUCTS: &str = "get_reference_product.php";
pub const VITAMINS: &str = "vitamins.php";

/// `action` field value the activity save endpoint expects.
pub const SAVE_ACTIVITY_ACTION: &str = "save_activity";
