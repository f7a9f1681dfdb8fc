//! Request payloads and form validation.

pub mod product_form;

pub use product_form::{
    CreateProductRequest, FieldIssue, RawNumber, RawTags, UpdateProductRequest, ValidationError,
};
