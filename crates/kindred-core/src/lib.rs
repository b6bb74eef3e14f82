//! Kindred Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Kindred family
//! tree layout engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Members**: The family member record ([`member::FamilyMember`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod member;
