//! `Path` and `Query` that reject through [`Error`], so a malformed id or
//! query string gets the same JSON envelope as every other failure.

use axum::extract::FromRequestParts;

use crate::error::Error;

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct Path<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct Query<T>(pub T);
