//! Layout components shared across routes.

mod auth_card;

pub(crate) use auth_card::AuthCard;
