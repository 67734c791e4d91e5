//! Terminal rendering of view models.

use api_shared::{
    BirthPlanQuestion, ChatMessage, CrisisWeek, FoodPost, GrowthRecord, PregnancySummary,
    ReferenceProduct, Vaccination, Visit, Vitamin,
};
use momcare_core::layout::{equal_width_grid, GridLayout};
use momcare_core::presentation::View;
use momcare_core::screens::chat::is_from_patient;
use momcare_core::screens::{Activity, ActivityProgress, PregnancyProgress};

/// Width of the terminal area the home menu is laid out in, in characters.
pub const MENU_WIDTH: u32 = 72;
pub const MENU_COLUMNS: u32 = 2;
pub const MENU_SPACING: u32 = 2;

pub const HOME_MENU: [(&str, &str); 10] = [
    ("visits", "Sổ khám thai"),
    ("growth", "Thai nhi theo tuần"),
    ("pregnancy", "Thông tin thai kỳ"),
    ("vaccinations", "Lịch tiêm chủng"),
    ("activities", "Thai giáo mỗi ngày"),
    ("birth-plan", "Kế hoạch sinh"),
    ("chat", "Hỏi bác sĩ"),
    ("crisis-weeks", "Tuần khủng hoảng"),
    ("food", "Dinh dưỡng"),
    ("vitamins", "Vitamin"),
];

/// Lines for a list view. The error view ends with the retry control label.
pub fn view_lines(view: &View) -> Vec<String> {
    match view {
        View::Pending => vec![],
        View::Loading => vec!["Đang tải...".to_string()],
        View::Error {
            message,
            retry_label,
        } => vec![format!("⚠ {message}"), format!("[{retry_label}]")],
        View::Empty(message) => vec![message.clone()],
        View::Items(items) => items.iter().map(|i| format!("• {i}")).collect(),
    }
}

pub fn print_view(view: &View) {
    for line in view_lines(view) {
        println!("{line}");
    }
}

/// Lay the home menu out in a two-column grid, one cell per entry.
pub fn home_menu_lines() -> Vec<String> {
    let cells: Vec<String> = HOME_MENU
        .iter()
        .map(|(command, label)| format!("{label} ({command})"))
        .collect();
    let grid: GridLayout = equal_width_grid(
        MENU_COLUMNS,
        MENU_SPACING,
        MENU_WIDTH,
        &vec![1; cells.len()],
    );

    let mut rows: Vec<String> = Vec::new();
    for (cell, (x, y)) in cells.iter().zip(&grid.positions) {
        let row = (*y / (grid.row_height + MENU_SPACING)) as usize;
        if rows.len() <= row {
            rows.push(String::new());
        }
        let line = &mut rows[row];
        let pad = (*x as usize).saturating_sub(line.chars().count());
        line.push_str(&" ".repeat(pad));
        line.extend(cell.chars().take(grid.column_width as usize));
    }
    rows
}

pub fn visit_line(visit: &Visit) -> String {
    let mut line = format!(
        "[{}] {} - {} - tuần {} - {} kg - HA {} - tim thai {}",
        visit.visit_id,
        visit.visit_date,
        visit.doctor_name,
        visit.gestational_age,
        visit.weight,
        visit.blood_pressure,
        visit.fetal_heart_rate
    );
    if let Some(notes) = visit.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        line.push_str(&format!(" ({notes})"));
    }
    line
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn growth_line(record: &GrowthRecord) -> String {
    format!(
        "Tuần {}: {} g, {} cm",
        record.week.as_deref().unwrap_or("?"),
        or_dash(record.weight),
        or_dash(record.length)
    )
}

pub fn vaccination_line(shot: &Vaccination) -> String {
    let tick = if shot.is_injected { "x" } else { " " };
    format!(
        "[{tick}] #{} {} - {} - {}",
        shot.id, shot.vaccine_name, shot.vaccination_date, shot.location
    )
}

pub fn activity_line(activity: &Activity) -> String {
    let tick = if activity.done { "x" } else { " " };
    format!("[{tick}] {} - {}", activity.title, activity.description)
}

pub fn progress_line(progress: &ActivityProgress) -> String {
    format!(
        "Ngày {} - hoàn thành {}%",
        progress.day_index, progress.completion_percent
    )
}

pub fn summary_lines(summary: &PregnancySummary, progress: &PregnancyProgress) -> Vec<String> {
    vec![
        format!("Tuần {} ({}%)", progress.week, progress.percent),
        format!("Chiều dài: {} cm", summary.length),
        format!("Cân nặng: {} g", summary.weight),
        format!("Dự sinh: {}", summary.due_date),
    ]
}

pub fn birth_plan_line(question: &BirthPlanQuestion) -> String {
    let options: Vec<String> = question
        .options
        .iter()
        .map(|o| {
            let tick = if o.is_selected { "x" } else { " " };
            format!("[{tick}] {} ({})", o.text, o.id)
        })
        .collect();
    format!("{} ({}): {}", question.title, question.id, options.join("  "))
}

pub fn chat_line(message: &ChatMessage) -> String {
    let who = if is_from_patient(message) {
        "Mẹ"
    } else {
        "Bác sĩ"
    };
    format!("{} {who}: {}", message.time, message.message)
}

pub fn crisis_week_line(week: &CrisisWeek) -> String {
    format!(
        "Tuần {}: {} - {}",
        or_dash(week.week),
        week.title.as_deref().unwrap_or(""),
        week.description.as_deref().unwrap_or("")
    )
}

pub fn food_line(post: &FoodPost) -> String {
    format!(
        "{} [{}] {}",
        post.name,
        post.category.as_deref().unwrap_or("-"),
        post.benefits.as_deref().unwrap_or("")
    )
}

pub fn product_line(product: &ReferenceProduct) -> String {
    match product.description.as_deref() {
        Some(description) => format!("{}: {description}", product.name),
        None => product.name.clone(),
    }
}

pub fn vitamin_line(vitamin: &Vitamin) -> String {
    format!("{} - {} - {}", vitamin.name, vitamin.dosage, vitamin.benefits)
}
