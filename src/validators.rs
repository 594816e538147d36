//! Local form and artifact validation. Everything here is pure: wall-clock
//! time is an input, and nothing that fails validation is ever sent to the
//! backend.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::ImageArtifact;

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
const ALLOWED_IMAGE_MIMES: [&str; 2] = ["image/jpeg", "image/png"];

/// A manufacturer's pending batch registration, mutated by the form until
/// submission.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BatchForm {
    pub medicine_name: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: Option<NaiveDate>,
    pub ingredients: String,
    pub usage: String,
    pub storage: String,
    pub quantity_manufactured: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Field name to inline message; ordered for stable rendering.
    pub errors: BTreeMap<String, String>,
}

pub fn validate_batch_form(form: &BatchForm, now: DateTime<Utc>) -> ValidationOutcome {
    let mut errors = BTreeMap::new();

    if form.medicine_name.trim().is_empty() {
        errors.insert(
            "medicine_name".to_string(),
            "Medicine name is required".to_string(),
        );
    }

    if form.manufacturer.trim().is_empty() {
        errors.insert(
            "manufacturer".to_string(),
            "Manufacturer is required".to_string(),
        );
    }

    if form.batch_number.trim().is_empty() {
        errors.insert(
            "batch_number".to_string(),
            "Batch number is required".to_string(),
        );
    }

    match form.expiry_date {
        None => {
            errors.insert(
                "expiry_date".to_string(),
                "Expiry date is required".to_string(),
            );
        }
        // Date granularity: a batch expiring today is already unusable.
        Some(expiry) if expiry <= now.date_naive() => {
            errors.insert(
                "expiry_date".to_string(),
                "Expiry date must be in the future".to_string(),
            );
        }
        Some(_) => {}
    }

    if form.ingredients.trim().is_empty() {
        errors.insert(
            "ingredients".to_string(),
            "Ingredients are required".to_string(),
        );
    }

    if form.quantity_manufactured <= 0 {
        errors.insert(
            "quantity_manufactured".to_string(),
            "Valid quantity is required".to_string(),
        );
    }

    ValidationOutcome {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRejection {
    #[error("Image is required")]
    Missing,

    #[error("Image size must be less than 5MB")]
    TooLarge,

    #[error("Only JPEG and PNG images are allowed")]
    UnsupportedType,
}

pub fn validate_image(file: Option<&ImageArtifact>) -> Result<(), ImageRejection> {
    let Some(file) = file else {
        return Err(ImageRejection::Missing);
    };

    if file.size_bytes() > MAX_IMAGE_BYTES {
        return Err(ImageRejection::TooLarge);
    }

    if !ALLOWED_IMAGE_MIMES.contains(&file.mime.as_str()) {
        return Err(ImageRejection::UnsupportedType);
    }

    Ok(())
}

/// Outcome of comparing a pharmacy's received quantity against the
/// manufacturer's records. A surplus is the suspicious case: more units in
/// circulation than were ever produced.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuantityFinding {
    Match,
    Shortage { missing: u64, percent: f64 },
    Excess { surplus: u64, percent: f64 },
}

pub fn check_received_quantity(manufactured: i64, received: i64) -> QuantityFinding {
    let difference = received - manufactured;
    let percent = if manufactured > 0 {
        ((difference.unsigned_abs() as f64 / manufactured as f64) * 1000.0).round() / 10.0
    } else {
        0.0
    };

    if difference > 0 {
        QuantityFinding::Excess {
            surplus: difference.unsigned_abs(),
            percent,
        }
    } else if difference < 0 {
        QuantityFinding::Shortage {
            missing: difference.unsigned_abs(),
            percent,
        }
    } else {
        QuantityFinding::Match
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::test_png_bytes;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    fn valid_form() -> BatchForm {
        BatchForm {
            medicine_name: "Amoxicillin 500mg".to_string(),
            manufacturer: "Acme Pharma".to_string(),
            batch_number: "B-2031".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2027, 1, 31),
            ingredients: "amoxicillin trihydrate".to_string(),
            usage: "oral, three times daily".to_string(),
            storage: "below 25C".to_string(),
            quantity_manufactured: 10_000,
        }
    }

    #[test]
    fn valid_form_passes_with_no_errors() {
        let outcome = validate_batch_form(&valid_form(), fixed_now());
        assert!(outcome.is_valid);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn each_missing_required_field_is_reported_under_its_key() {
        let cases: [(&str, fn(&mut BatchForm)); 5] = [
            ("medicine_name", |f| f.medicine_name = "  ".to_string()),
            ("manufacturer", |f| f.manufacturer.clear()),
            ("batch_number", |f| f.batch_number = "\t".to_string()),
            ("ingredients", |f| f.ingredients.clear()),
            ("expiry_date", |f| f.expiry_date = None),
        ];

        for (field, mutate) in cases {
            let mut form = valid_form();
            mutate(&mut form);
            let outcome = validate_batch_form(&form, fixed_now());
            assert!(!outcome.is_valid, "{field} should invalidate the form");
            assert!(outcome.errors.contains_key(field), "missing key {field}");
        }
    }

    #[test]
    fn expiry_must_be_strictly_in_the_future() {
        let mut form = valid_form();
        form.expiry_date = NaiveDate::from_ymd_opt(2026, 8, 7); // today
        assert!(validate_batch_form(&form, fixed_now())
            .errors
            .contains_key("expiry_date"));

        form.expiry_date = NaiveDate::from_ymd_opt(2026, 8, 8); // tomorrow
        assert!(validate_batch_form(&form, fixed_now()).is_valid);
    }

    #[test]
    fn quantity_must_be_positive() {
        for quantity in [0, -5] {
            let mut form = valid_form();
            form.quantity_manufactured = quantity;
            assert!(validate_batch_form(&form, fixed_now())
                .errors
                .contains_key("quantity_manufactured"));
        }
    }

    #[test]
    fn image_validation_rejects_missing_file() {
        assert_eq!(validate_image(None), Err(ImageRejection::Missing));
    }

    #[test]
    fn image_size_limit_applies_regardless_of_type() {
        let artifact = ImageArtifact {
            file_name: "big.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0; (MAX_IMAGE_BYTES + 1) as usize],
        };
        assert_eq!(validate_image(Some(&artifact)), Err(ImageRejection::TooLarge));

        let wrong_type_and_big = ImageArtifact {
            mime: "image/gif".to_string(),
            ..artifact
        };
        // Size is checked first, so an oversized GIF is still TooLarge.
        assert_eq!(
            validate_image(Some(&wrong_type_and_big)),
            Err(ImageRejection::TooLarge)
        );
    }

    #[test]
    fn image_type_limit_applies_regardless_of_size() {
        let artifact = ImageArtifact {
            file_name: "anim.gif".to_string(),
            mime: "image/gif".to_string(),
            bytes: vec![0; 128],
        };
        assert_eq!(
            validate_image(Some(&artifact)),
            Err(ImageRejection::UnsupportedType)
        );
    }

    #[test]
    fn sniffed_png_within_limit_is_accepted() {
        let artifact = ImageArtifact::from_camera_frame(test_png_bytes(8, 8)).unwrap();
        assert_eq!(validate_image(Some(&artifact)), Ok(()));
    }

    #[test]
    fn quantity_check_classifies_excess_shortage_and_match() {
        assert_eq!(
            check_received_quantity(1000, 1000),
            QuantityFinding::Match
        );
        assert_eq!(
            check_received_quantity(1000, 1150),
            QuantityFinding::Excess {
                surplus: 150,
                percent: 15.0
            }
        );
        assert_eq!(
            check_received_quantity(1000, 900),
            QuantityFinding::Shortage {
                missing: 100,
                percent: 10.0
            }
        );
    }

    #[test]
    fn quantity_check_survives_zero_manufactured() {
        assert_eq!(
            check_received_quantity(0, 10),
            QuantityFinding::Excess {
                surplus: 10,
                percent: 0.0
            }
        );
    }
}
