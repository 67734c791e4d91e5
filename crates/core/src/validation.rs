//! Form validation.
//!
//! This module turns what the user typed into request bodies. Every check runs before any
//! network call; a failing check yields `ClientError::InvalidInput` carrying the message the
//! form shows next to its submit button.

use crate::{ClientError, ClientResult};
use api_shared::forms::{GrowthRecordForm, LoginForm, PregnancySummaryForm, RegisterForm, VisitForm};
use momcare_types::{GestationalWeek, IsoDate, NonEmptyText, UserId};

pub const MSG_LOGIN_INCOMPLETE: &str = "Vui lòng nhập đầy đủ thông tin";
pub const MSG_FORM_INCOMPLETE: &str = "Vui lòng điền đầy đủ thông tin";
pub const MSG_PASSWORD_MISMATCH: &str = "Mật khẩu không khớp";
pub const MSG_VISIT_INCOMPLETE: &str = "Vui lòng điền đầy đủ thông tin bắt buộc";
pub const MSG_WEEK_RANGE_SUMMARY: &str = "Tuần thai phải từ 1 đến 42";
pub const MSG_WEEK_RANGE_RECORD: &str = "Tuần thai phải từ 1 đến 40";
pub const MSG_LENGTH_POSITIVE: &str = "Chiều dài phải là số dương";
pub const MSG_WEIGHT_POSITIVE: &str = "Cân nặng phải là số dương";
pub const MSG_DUE_DATE_FORMAT: &str = "Dự sinh phải có định dạng YYYY-MM-DD";
pub const MSG_EMPTY_MESSAGE: &str = "Vui lòng nhập tin nhắn";

fn invalid(message: &str) -> ClientError {
    ClientError::InvalidInput(message.to_string())
}

fn any_blank(fields: &[&str]) -> bool {
    fields.iter().any(|f| f.trim().is_empty())
}

/// Validates login credentials.
///
/// # Errors
///
/// Returns `ClientError::InvalidInput` if either field is blank.
pub fn login_form(username: &str, password: &str) -> ClientResult<LoginForm> {
    if any_blank(&[username, password]) {
        return Err(invalid(MSG_LOGIN_INCOMPLETE));
    }
    Ok(LoginForm {
        username: username.trim().to_string(),
        password: password.to_string(),
    })
}

/// Registration form as typed.
#[derive(Clone, Debug, Default)]
pub struct RegisterDraft {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    /// Optional.
    pub email: String,
}

/// Validates a registration draft.
///
/// # Errors
///
/// Returns `ClientError::InvalidInput` if a required field is blank or the two passwords
/// differ.
pub fn register_form(draft: &RegisterDraft) -> ClientResult<RegisterForm> {
    if any_blank(&[
        &draft.username,
        &draft.password,
        &draft.confirm_password,
        &draft.name,
    ]) {
        return Err(invalid(MSG_FORM_INCOMPLETE));
    }
    if draft.password != draft.confirm_password {
        return Err(invalid(MSG_PASSWORD_MISMATCH));
    }
    Ok(RegisterForm {
        username: draft.username.trim().to_string(),
        password: draft.password.clone(),
        name: draft.name.trim().to_string(),
        email: draft.email.trim().to_string(),
    })
}

/// One antenatal visit as typed. Every field except `notes` is required.
#[derive(Clone, Debug, Default)]
pub struct VisitDraft {
    pub visit_date: String,
    pub doctor_name: String,
    pub gestational_age: String,
    pub weight: String,
    pub blood_pressure: String,
    pub fetal_heart_rate: String,
    pub notes: String,
}

/// Validates a visit draft.
///
/// Values are sent as typed (trimmed); the backend stores them as text.
///
/// # Errors
///
/// Returns `ClientError::InvalidInput` if a required field is blank.
pub fn visit_form(user_id: &UserId, draft: &VisitDraft) -> ClientResult<VisitForm> {
    if any_blank(&[
        &draft.visit_date,
        &draft.doctor_name,
        &draft.gestational_age,
        &draft.weight,
        &draft.blood_pressure,
        &draft.fetal_heart_rate,
    ]) {
        return Err(invalid(MSG_VISIT_INCOMPLETE));
    }

    let notes = draft.notes.trim();
    Ok(VisitForm {
        visit_id: None,
        user_id: user_id.to_string(),
        visit_date: draft.visit_date.trim().to_string(),
        doctor_name: draft.doctor_name.trim().to_string(),
        gestational_age: draft.gestational_age.trim().to_string(),
        weight: draft.weight.trim().to_string(),
        blood_pressure: draft.blood_pressure.trim().to_string(),
        fetal_heart_rate: draft.fetal_heart_rate.trim().to_string(),
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })
}

/// Pregnancy summary edit as typed.
#[derive(Clone, Debug, Default)]
pub struct SummaryDraft {
    pub week: String,
    pub length: String,
    pub weight: String,
    pub due_date: String,
}

fn positive(input: &str, message: &str) -> ClientResult<f64> {
    match input.trim().parse::<f64>() {
        Ok(value) if value > 0.0 && value.is_finite() => Ok(value),
        _ => Err(invalid(message)),
    }
}

/// Validates a pregnancy summary edit.
///
/// Checks run in form order and the first failure wins: week in `1..=42`, length and weight
/// strictly positive, due date `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `ClientError::InvalidInput` carrying the first failing check's message.
pub fn summary_form(user_id: &UserId, draft: &SummaryDraft) -> ClientResult<PregnancySummaryForm> {
    let week = GestationalWeek::parse(&draft.week, GestationalWeek::MAX)
        .map_err(|_| invalid(MSG_WEEK_RANGE_SUMMARY))?;
    let length = positive(&draft.length, MSG_LENGTH_POSITIVE)?;
    let weight = positive(&draft.weight, MSG_WEIGHT_POSITIVE)?;
    let due_date = IsoDate::parse(&draft.due_date).map_err(|_| invalid(MSG_DUE_DATE_FORMAT))?;

    Ok(PregnancySummaryForm {
        user_id: user_id.to_string(),
        week: week.get(),
        length,
        weight,
        due_date: due_date.to_string(),
    })
}

/// New weekly growth record as typed.
#[derive(Clone, Debug, Default)]
pub struct GrowthRecordDraft {
    pub week: String,
    pub weight: String,
    pub length: String,
    pub due_date: String,
}

/// Validates a growth record draft: all fields present, week in `1..=40`.
///
/// Weight, length and due date are passed through as typed.
///
/// # Errors
///
/// Returns `ClientError::InvalidInput` if a field is blank or the week is out of range.
pub fn growth_record_form(
    user_id: &UserId,
    draft: &GrowthRecordDraft,
) -> ClientResult<GrowthRecordForm> {
    if any_blank(&[&draft.week, &draft.weight, &draft.length, &draft.due_date]) {
        return Err(invalid(MSG_FORM_INCOMPLETE));
    }
    let week = GestationalWeek::parse(&draft.week, GestationalWeek::TERM)
        .map_err(|_| invalid(MSG_WEEK_RANGE_RECORD))?;

    Ok(GrowthRecordForm {
        user_id: user_id.to_string(),
        week: week.to_string(),
        weight: draft.weight.trim().to_string(),
        length: draft.length.trim().to_string(),
        due_date: draft.due_date.trim().to_string(),
    })
}

/// Validates a chat message. Blank messages are never sent.
pub fn message_text(text: &str) -> ClientResult<NonEmptyText> {
    NonEmptyText::new(text).map_err(|_| invalid(MSG_EMPTY_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("42").unwrap()
    }

    fn message_of(err: ClientError) -> String {
        match err {
            ClientError::InvalidInput(m) => m,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let err = login_form("lan", "  ").unwrap_err();
        assert_eq!(message_of(err), MSG_LOGIN_INCOMPLETE);
        assert_eq!(login_form(" lan ", "pw").unwrap().username, "lan");
    }

    #[test]
    fn test_register_password_mismatch() {
        let draft = RegisterDraft {
            username: "lan".into(),
            password: "a".into(),
            confirm_password: "b".into(),
            name: "Lan Anh".into(),
            email: String::new(),
        };
        assert_eq!(message_of(register_form(&draft).unwrap_err()), MSG_PASSWORD_MISMATCH);
    }

    #[test]
    fn test_register_email_is_optional() {
        let draft = RegisterDraft {
            username: "lan".into(),
            password: "a".into(),
            confirm_password: "a".into(),
            name: "Lan Anh".into(),
            email: String::new(),
        };
        assert!(register_form(&draft).is_ok());
    }

    #[test]
    fn test_visit_requires_fields_but_not_notes() {
        let mut draft = VisitDraft {
            visit_date: "2025-05-01".into(),
            doctor_name: "BS. Hà".into(),
            gestational_age: "20".into(),
            weight: "55".into(),
            blood_pressure: "110/70".into(),
            fetal_heart_rate: "140".into(),
            notes: "  ".into(),
        };
        let form = visit_form(&user(), &draft).unwrap();
        assert_eq!(form.notes, None);
        assert_eq!(form.user_id, "42");

        draft.doctor_name = String::new();
        assert_eq!(
            message_of(visit_form(&user(), &draft).unwrap_err()),
            MSG_VISIT_INCOMPLETE
        );
    }

    #[test]
    fn test_summary_checks_in_order() {
        let mut draft = SummaryDraft {
            week: "43".into(),
            length: "-1".into(),
            weight: "300".into(),
            due_date: "2025-8-1".into(),
        };
        assert_eq!(
            message_of(summary_form(&user(), &draft).unwrap_err()),
            MSG_WEEK_RANGE_SUMMARY
        );

        draft.week = "42".into();
        assert_eq!(
            message_of(summary_form(&user(), &draft).unwrap_err()),
            MSG_LENGTH_POSITIVE
        );

        draft.length = "25.5".into();
        assert_eq!(
            message_of(summary_form(&user(), &draft).unwrap_err()),
            MSG_DUE_DATE_FORMAT
        );

        draft.due_date = "2025-08-01".into();
        let form = summary_form(&user(), &draft).unwrap();
        assert_eq!(form.week, 42);
        assert_eq!(form.length, 25.5);
    }

    #[test]
    fn test_summary_rejects_zero_weight() {
        let draft = SummaryDraft {
            week: "20".into(),
            length: "25".into(),
            weight: "0".into(),
            due_date: "2025-08-01".into(),
        };
        assert_eq!(
            message_of(summary_form(&user(), &draft).unwrap_err()),
            MSG_WEIGHT_POSITIVE
        );
    }

    #[test]
    fn test_growth_record_week_capped_at_term() {
        let mut draft = GrowthRecordDraft {
            week: "41".into(),
            weight: "3.2".into(),
            length: "50".into(),
            due_date: "2025-08-01".into(),
        };
        assert_eq!(
            message_of(growth_record_form(&user(), &draft).unwrap_err()),
            MSG_WEEK_RANGE_RECORD
        );

        draft.week = "40".into();
        assert_eq!(growth_record_form(&user(), &draft).unwrap().week, "40");

        draft.length = String::new();
        assert_eq!(
            message_of(growth_record_form(&user(), &draft).unwrap_err()),
            MSG_FORM_INCOMPLETE
        );
    }

    #[test]
    fn test_blank_message_rejected() {
        assert_eq!(message_of(message_text("   ").unwrap_err()), MSG_EMPTY_MESSAGE);
        assert_eq!(message_text(" chào bác sĩ ").unwrap().as_str(), "chào bác sĩ");
    }
}
