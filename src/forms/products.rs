use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::{StringRecord, Trim};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{QUANTITY_MAX, parse_price_cents, sanitize_inline_text, sanitize_optional};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a SKU.
const SKU_MAX_LEN: usize = 64;
const SKU_MAX_LEN_VALIDATOR: u64 = SKU_MAX_LEN as u64;

const UNITS_MAX_LEN_VALIDATOR: u64 = 16;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("product SKU cannot be empty")]
    EmptySku,
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// The uploaded CSV is missing required columns.
    #[error("upload is missing the required `name`/`title`, `sku` or `price` headers")]
    MissingRequiredHeaders,
    #[error("row {row} is missing a product name")]
    UploadMissingName { row: usize },
    #[error("row {row} is missing a SKU")]
    UploadMissingSku { row: usize },
    #[error("row {row} has invalid price `{value}`")]
    UploadInvalidPrice { row: usize, value: String },
    #[error("row {row} has invalid minimum quantity `{value}`")]
    UploadInvalidMinQuantity { row: usize, value: String },
    /// The uploaded CSV did not contain any usable products.
    #[error("upload contains no products")]
    EmptyUpload,
    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Payload for creating a product. `price` is a decimal amount such as `4.99`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Stock keeping unit, unique within the location.
    #[validate(length(min = 1, max = SKU_MAX_LEN_VALIDATOR))]
    pub sku: String,
    /// Selling price.
    pub price: String,
    /// Default reorder threshold for new inventory records.
    #[validate(range(min = 0, max = QUANTITY_MAX))]
    #[serde(default)]
    pub min_quantity: i32,
    /// Optional unit label such as `kg` or `pcs`.
    #[validate(length(max = UNITS_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub units: Option<String>,
    /// Optional category of the product.
    #[serde(default)]
    pub category_id: Option<i32>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, location_id: i32) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }
        let sku = sanitize_sku(&self.sku);
        if sku.is_empty() {
            return Err(ProductFormError::EmptySku);
        }
        let price_cents = parse_price(&self.price)?;

        let mut new_product = NewProduct::new(location_id, name, sku, price_cents)
            .with_min_quantity(self.min_quantity);
        if let Some(units) = sanitize_optional(self.units.as_deref()) {
            new_product = new_product.with_units(units);
        }
        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category_id(category_id);
        }

        Ok(new_product)
    }
}

/// Payload for editing a product. Every field is replaced.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Stock keeping unit, unique within the location.
    #[validate(length(min = 1, max = SKU_MAX_LEN_VALIDATOR))]
    pub sku: String,
    /// Selling price.
    pub price: String,
    /// Low-stock threshold.
    #[validate(range(min = 0, max = QUANTITY_MAX))]
    #[serde(default)]
    pub min_quantity: i32,
    /// Unit of measure, e.g. `kg`.
    #[validate(length(max = UNITS_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub units: Option<String>,
    /// Category the product is filed under.
    #[serde(default)]
    pub category_id: Option<i32>,
    /// Archived products stay on record but cannot be sold.
    #[serde(default)]
    pub is_archived: bool,
}

impl EditProductForm {
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }
        let sku = sanitize_sku(&self.sku);
        if sku.is_empty() {
            return Err(ProductFormError::EmptySku);
        }

        Ok(UpdateProduct {
            category_id: self.category_id,
            name,
            sku,
            price_cents: parse_price(&self.price)?,
            min_quantity: self.min_quantity,
            units: sanitize_optional(self.units.as_deref()),
            is_archived: self.is_archived,
            updated_at: chrono::Local::now().naive_utc(),
        })
    }
}

#[derive(MultipartForm)]
/// Multipart form for uploading a CSV file with new products.
pub struct UploadProductsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadProductsForm {
    /// Parse the uploaded CSV file into a list of [`NewProduct`] records.
    pub fn parse(&mut self, location_id: i32) -> ProductFormResult<Vec<NewProduct>> {
        self.csv.file.rewind()?;
        parse_products(self.csv.file.by_ref(), location_id)
    }
}

struct ProductHeaderIndexes {
    name_index: Option<usize>,
    title_index: Option<usize>,
    sku_index: Option<usize>,
    price_index: Option<usize>,
    min_quantity_index: Option<usize>,
    units_index: Option<usize>,
}

/// Read products from CSV with headers `name` (or `title`), `sku`, `price`
/// and the optional `min_quantity` and `units`. Header names are matched
/// case-insensitively; row numbers in errors count the header as row 1.
pub(crate) fn parse_products<R: Read>(
    reader: R,
    location_id: i32,
) -> ProductFormResult<Vec<NewProduct>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let indexes = locate_product_headers(&headers);

    if indexes.name_index.is_none() && indexes.title_index.is_none() {
        return Err(ProductFormError::MissingRequiredHeaders);
    }
    let (Some(sku_index), Some(price_index)) = (indexes.sku_index, indexes.price_index) else {
        return Err(ProductFormError::MissingRequiredHeaders);
    };

    let mut products = Vec::new();

    for (index, row) in reader.records().enumerate() {
        let row_number = index + 2;
        let record = row?;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let name = sanitize_inline_text(resolve_product_name(
            &record,
            indexes.name_index,
            indexes.title_index,
        ));
        if name.is_empty() {
            return Err(ProductFormError::UploadMissingName { row: row_number });
        }

        let sku = sanitize_sku(record.get(sku_index).unwrap_or(""));
        if sku.is_empty() {
            return Err(ProductFormError::UploadMissingSku { row: row_number });
        }

        let price_raw = record.get(price_index).unwrap_or("");
        let Some(price_cents) = parse_price_cents(price_raw) else {
            return Err(ProductFormError::UploadInvalidPrice {
                row: row_number,
                value: price_raw.to_string(),
            });
        };

        let mut product = NewProduct::new(location_id, name, sku, price_cents);

        if let Some(raw) = indexes
            .min_quantity_index
            .and_then(|idx| record.get(idx))
            .filter(|value| !value.is_empty())
        {
            match raw.parse::<i32>() {
                Ok(min_quantity) if (0..=QUANTITY_MAX).contains(&min_quantity) => {
                    product = product.with_min_quantity(min_quantity);
                }
                _ => {
                    return Err(ProductFormError::UploadInvalidMinQuantity {
                        row: row_number,
                        value: raw.to_string(),
                    });
                }
            }
        }

        if let Some(units) = sanitize_optional(indexes.units_index.and_then(|idx| record.get(idx)))
        {
            product = product.with_units(units);
        }

        products.push(product);
    }

    if products.is_empty() {
        return Err(ProductFormError::EmptyUpload);
    }

    Ok(products)
}

fn locate_product_headers(headers: &StringRecord) -> ProductHeaderIndexes {
    ProductHeaderIndexes {
        name_index: locate_header(headers, "name"),
        title_index: locate_header(headers, "title"),
        sku_index: locate_header(headers, "sku"),
        price_index: locate_header(headers, "price"),
        min_quantity_index: locate_header(headers, "min_quantity"),
        units_index: locate_header(headers, "units"),
    }
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(expected))
}

fn resolve_product_name(
    record: &StringRecord,
    name_index: Option<usize>,
    title_index: Option<usize>,
) -> &str {
    [name_index, title_index]
        .into_iter()
        .flatten()
        .filter_map(|index| record.get(index))
        .find(|value| !value.trim().is_empty())
        .unwrap_or("")
}

fn sanitize_sku(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
}

fn parse_price(raw: &str) -> ProductFormResult<i64> {
    parse_price_cents(raw).ok_or_else(|| ProductFormError::InvalidPrice {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn add_form(name: &str, sku: &str, price: &str) -> AddProductForm {
        AddProductForm {
            name: name.to_string(),
            sku: sku.to_string(),
            price: price.to_string(),
            min_quantity: 3,
            units: Some(" kg ".to_string()),
            category_id: None,
        }
    }

    #[test]
    fn add_product_form_converts_successfully() {
        let new_product = add_form("  Basmati   Rice ", " RICE-01 ", "12.50")
            .into_new_product(42)
            .expect("expected success");

        assert_eq!(new_product.location_id, 42);
        assert_eq!(new_product.name, "Basmati Rice");
        assert_eq!(new_product.sku, "RICE-01");
        assert_eq!(new_product.price_cents, 1250);
        assert_eq!(new_product.min_quantity, 3);
        assert_eq!(new_product.units.as_deref(), Some("kg"));
    }

    #[test]
    fn add_product_form_rejects_empty_name() {
        let result = add_form("   ", "SKU", "1").into_new_product(1);

        assert!(matches!(result, Err(ProductFormError::EmptyName)));
    }

    #[test]
    fn add_product_form_rejects_invalid_price() {
        let result = add_form("Rice", "SKU", "12,50").into_new_product(1);

        assert!(matches!(
            result,
            Err(ProductFormError::InvalidPrice { value }) if value == "12,50"
        ));
    }

    #[test]
    fn edit_product_form_replaces_fields() {
        let form = EditProductForm {
            name: "Rice".to_string(),
            sku: "RICE-02".to_string(),
            price: "3".to_string(),
            min_quantity: 0,
            units: Some("  ".to_string()),
            category_id: Some(4),
            is_archived: true,
        };

        let update = form.into_update_product().expect("expected success");

        assert_eq!(update.sku, "RICE-02");
        assert_eq!(update.price_cents, 300);
        assert!(update.units.is_none());
        assert_eq!(update.category_id, Some(4));
        assert!(update.is_archived);
    }

    #[test]
    fn parse_products_reads_rows() {
        let csv = "Title,SKU,Price,min_quantity,units\nBeans,BN-1,2.5,4,kg\nOil,OIL-1,10,,\n\n";

        let products = parse_products(Cursor::new(csv), 5).expect("should parse");

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Beans");
        assert_eq!(products[0].price_cents, 250);
        assert_eq!(products[0].min_quantity, 4);
        assert_eq!(products[0].units.as_deref(), Some("kg"));
        assert_eq!(products[1].sku, "OIL-1");
        assert_eq!(products[1].min_quantity, 0);
        assert!(products[1].units.is_none());
    }

    #[test]
    fn parse_products_requires_price_header() {
        let csv = "name,sku\nBeans,BN-1\n";

        let result = parse_products(Cursor::new(csv), 5);

        assert!(matches!(
            result,
            Err(ProductFormError::MissingRequiredHeaders)
        ));
    }

    #[test]
    fn parse_products_reports_row_of_bad_price() {
        let csv = "name,sku,price\nBeans,BN-1,2\nOil,OIL-1,free\n";

        let result = parse_products(Cursor::new(csv), 5);

        assert!(matches!(
            result,
            Err(ProductFormError::UploadInvalidPrice { row: 3, value }) if value == "free"
        ));
    }

    #[test]
    fn parse_products_rejects_header_only_upload() {
        let result = parse_products(Cursor::new("name,sku,price\n"), 5);

        assert!(matches!(result, Err(ProductFormError::EmptyUpload)));
    }
}
