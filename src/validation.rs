//! Product form validation
//!
//! The add-product form is a fixed set of text fields. Each field has its own
//! validator, and every failing field is reported at once so the form can show
//! all messages inline.

use std::{collections::BTreeMap, fmt};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;
use thiserror::Error;

use crate::products::NewProduct;

/// Highest rating a product can have.
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// A field on the add-product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductField {
    /// Product name
    Name,
    /// Display asset reference
    Image,
    /// Category
    Category,
    /// Description
    Description,
    /// Specification
    Specification,
    /// Rating, 0 to 5
    Rating,
    /// Unit price
    Price,
    /// Initial stock
    Quantity,
}

impl ProductField {
    /// Every form field, in form order.
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Image,
        Self::Category,
        Self::Description,
        Self::Specification,
        Self::Rating,
        Self::Price,
        Self::Quantity,
    ];

    /// Field name as used in forms and session scripts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Image => "image",
            Self::Category => "category",
            Self::Description => "description",
            Self::Specification => "specification",
            Self::Rating => "rating",
            Self::Price => "price",
            Self::Quantity => "quantity",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Field left blank
    #[error("Required")]
    Required,

    /// Not parseable as a number
    #[error("Must be a number")]
    NotANumber,

    /// Below zero
    #[error("Must not be negative")]
    Negative,

    /// Fractional, negative or too large for a stock count
    #[error("Must be a non-negative integer")]
    NotNonNegativeInteger,

    /// Outside 0 to 5
    #[error("Rating 0-5")]
    RatingOutOfRange,
}

/// Field-to-message mapping for a rejected form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid product: {}", summary(.0))]
pub struct ValidationErrors(BTreeMap<ProductField, FieldError>);

impl ValidationErrors {
    /// The error recorded for a field, if any.
    pub fn get(&self, field: ProductField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    /// Iterate over failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductField, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: ProductField, error: FieldError) {
        self.0.insert(field, error);
    }
}

fn summary(errors: &BTreeMap<ProductField, FieldError>) -> String {
    errors
        .iter()
        .map(|(field, error)| format!("{field}: {error}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw add-product form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    /// Product name
    pub name: String,

    /// Display asset reference
    pub image: String,

    /// Category
    pub category: String,

    /// Description
    pub description: String,

    /// Specification
    pub specification: String,

    /// Rating, 0 to 5
    pub rating: String,

    /// Unit price
    pub price: String,

    /// Initial stock
    pub quantity: String,
}

impl ProductForm {
    /// The raw text entered for a field.
    pub fn value(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Image => &self.image,
            ProductField::Category => &self.category,
            ProductField::Description => &self.description,
            ProductField::Specification => &self.specification,
            ProductField::Rating => &self.rating,
            ProductField::Price => &self.price,
            ProductField::Quantity => &self.quantity,
        }
    }

    /// Validates every field and converts the form into product details.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each field that is blank or out of range.
    pub fn validate(&self) -> Result<NewProduct, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for field in ProductField::ALL {
            if self.value(field).trim().is_empty() {
                errors.insert(field, FieldError::Required);
            }
        }

        let price = self.parse(ProductField::Price, parse_price, &mut errors);
        let rating = self.parse(ProductField::Rating, parse_rating, &mut errors);
        let quantity = self.parse(ProductField::Quantity, parse_quantity, &mut errors);

        let (Some(price), Some(rating), Some(quantity)) = (price, rating, quantity) else {
            return Err(errors);
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewProduct {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            image: self.image.trim().to_string(),
            price,
            quantity,
            rating,
            description: self.description.trim().to_string(),
            specification: self.specification.trim().to_string(),
        })
    }

    /// Runs a field's parser unless the field is already known to be missing.
    fn parse<T>(
        &self,
        field: ProductField,
        parser: fn(&str) -> Result<T, FieldError>,
        errors: &mut ValidationErrors,
    ) -> Option<T> {
        if errors.get(field).is_some() {
            return None;
        }

        parser(self.value(field).trim())
            .map_err(|error| errors.insert(field, error))
            .ok()
    }
}

fn parse_number(value: &str) -> Result<Decimal, FieldError> {
    value
        .parse::<Decimal>()
        .map_err(|_err| FieldError::NotANumber)
}

fn parse_price(value: &str) -> Result<Decimal, FieldError> {
    let price = parse_number(value)?;

    if price < Decimal::ZERO {
        return Err(FieldError::Negative);
    }

    Ok(price)
}

fn parse_rating(value: &str) -> Result<Decimal, FieldError> {
    let rating = value
        .parse::<Decimal>()
        .map_err(|_err| FieldError::RatingOutOfRange)?;

    if rating < Decimal::ZERO || rating > MAX_RATING {
        return Err(FieldError::RatingOutOfRange);
    }

    Ok(rating)
}

fn parse_quantity(value: &str) -> Result<u32, FieldError> {
    let quantity = value
        .parse::<Decimal>()
        .map_err(|_err| FieldError::NotNonNegativeInteger)?;

    if !quantity.fract().is_zero() {
        return Err(FieldError::NotNonNegativeInteger);
    }

    quantity.to_u32().ok_or(FieldError::NotNonNegativeInteger)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn filled_form() -> ProductForm {
        ProductForm {
            name: "Yoga Mat".to_string(),
            image: "images/mat.jpg".to_string(),
            category: "Sportswear".to_string(),
            description: "Non-slip mat".to_string(),
            specification: "6mm".to_string(),
            rating: "4.2".to_string(),
            price: "1299.50".to_string(),
            quantity: "12".to_string(),
        }
    }

    #[test]
    fn valid_form_converts_to_new_product() -> TestResult {
        let product = filled_form().validate()?;

        assert_eq!(product.name, "Yoga Mat");
        assert_eq!(product.price, Decimal::new(129_950, 2));
        assert_eq!(product.rating, Decimal::new(42, 1));
        assert_eq!(product.quantity, 12);

        Ok(())
    }

    #[test]
    fn values_are_trimmed() -> TestResult {
        let form = ProductForm {
            name: "  Yoga Mat ".to_string(),
            quantity: " 3 ".to_string(),
            ..filled_form()
        };

        let product = form.validate()?;

        assert_eq!(product.name, "Yoga Mat");
        assert_eq!(product.quantity, 3);

        Ok(())
    }

    #[test]
    fn empty_form_reports_every_field() {
        let Err(errors) = ProductForm::default().validate() else {
            panic!("expected empty form to be rejected");
        };

        assert_eq!(errors.len(), ProductField::ALL.len());
        assert!(
            errors.iter().all(|(_, error)| error == FieldError::Required),
            "every field should be required"
        );
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let form = ProductForm {
            category: "   ".to_string(),
            ..filled_form()
        };

        let Err(errors) = form.validate() else {
            panic!("expected blank category to be rejected");
        };

        assert_eq!(errors.get(ProductField::Category), Some(FieldError::Required));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn exponent_notation_is_not_a_number() -> TestResult {
        let form = ProductForm {
            price: "1e3".to_string(),
            quantity: "2E1".to_string(),
            ..filled_form()
        };

        let errors = form.validate().err().ok_or("exponent input was accepted")?;

        assert_eq!(errors.get(ProductField::Price), Some(FieldError::NotANumber));
        assert_eq!(
            errors.get(ProductField::Quantity),
            Some(FieldError::NotNonNegativeInteger)
        );
        assert_eq!(errors.len(), 2);

        Ok(())
    }

    #[test]
    fn numeric_fields_are_checked_together() {
        let form = ProductForm {
            price: "abc".to_string(),
            rating: "5.5".to_string(),
            quantity: "2.5".to_string(),
            ..filled_form()
        };

        let Err(errors) = form.validate() else {
            panic!("expected numeric fields to be rejected");
        };

        assert_eq!(errors.get(ProductField::Price), Some(FieldError::NotANumber));
        assert_eq!(
            errors.get(ProductField::Rating),
            Some(FieldError::RatingOutOfRange)
        );
        assert_eq!(
            errors.get(ProductField::Quantity),
            Some(FieldError::NotNonNegativeInteger)
        );
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn negative_price_is_rejected() {
        let form = ProductForm {
            price: "-1".to_string(),
            ..filled_form()
        };

        assert_eq!(
            form.validate().err().and_then(|errors| errors.get(ProductField::Price)),
            Some(FieldError::Negative)
        );
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let form = ProductForm {
            quantity: "-4".to_string(),
            ..filled_form()
        };

        assert_eq!(
            form.validate()
                .err()
                .and_then(|errors| errors.get(ProductField::Quantity)),
            Some(FieldError::NotNonNegativeInteger)
        );
    }

    #[test]
    fn rating_bounds_are_inclusive() -> TestResult {
        for rating in ["0", "5", "5.0"] {
            let form = ProductForm {
                rating: rating.to_string(),
                ..filled_form()
            };

            form.validate()?;
        }

        Ok(())
    }

    #[test]
    fn whole_number_written_with_decimals_is_a_valid_quantity() -> TestResult {
        let form = ProductForm {
            quantity: "3.0".to_string(),
            ..filled_form()
        };

        assert_eq!(form.validate()?.quantity, 3);

        Ok(())
    }

    #[test]
    fn zero_price_and_stock_are_allowed() -> TestResult {
        let form = ProductForm {
            price: "0".to_string(),
            quantity: "0".to_string(),
            ..filled_form()
        };

        let product = form.validate()?;

        assert_eq!(product.price, Decimal::ZERO);
        assert_eq!(product.quantity, 0);

        Ok(())
    }

    #[test]
    fn error_message_lists_fields() {
        let form = ProductForm {
            name: String::new(),
            rating: "9".to_string(),
            ..filled_form()
        };

        let message = form.validate().err().map(|errors| errors.to_string());

        assert_eq!(
            message.as_deref(),
            Some("invalid product: name: Required, rating: Rating 0-5")
        );
    }
}
