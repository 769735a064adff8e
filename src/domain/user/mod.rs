//! User domain
//!
//! This module provides domain types and traits for user registration,
//! including the user entity, validation rules, and repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::{UserRepository, USERS_EMAIL_CONSTRAINT};
pub use validation::{
    has_required_character_classes, is_valid_email, is_valid_password_length,
    is_valid_username_length, Candidate, Field, FieldError, FieldRules, LocalizedErrors, Rule,
    UserValidator, ValidationErrors, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
    MIN_USERNAME_LENGTH,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
