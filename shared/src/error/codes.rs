//! Unified error codes for the Aula platform
//!
//! This module defines all error codes used across the center API, the
//! client, and the admin console. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Student payment errors
//! - 4xxx: Teacher payment errors
//! - 5xxx: Transaction errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token is invalid
    TokenInvalid = 1003,
    /// Session has expired
    SessionExpired = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Student Payment ====================
    /// Student payment record not found
    PaymentNotFound = 3001,
    /// Billing period is invalid
    PaymentPeriodInvalid = 3002,

    // ==================== 4xxx: Teacher Payment ====================
    /// Teacher payment record not found
    TeacherPaymentNotFound = 4001,
    /// Payout amount is invalid
    PayAmountInvalid = 4002,
    /// Payout amount exceeds the remaining balance
    PayExceedsRemaining = 4003,
    /// Teacher payment has already been settled in full
    TeacherPaymentSettled = 4004,
    /// Teacher not found
    TeacherNotFound = 4005,

    // ==================== 5xxx: Transaction ====================
    /// Transaction not found
    TransactionNotFound = 5001,
    /// Transaction type is invalid
    TransactionTypeInvalid = 5002,
    /// Transaction date is invalid
    TransactionDateInvalid = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Operation timeout
    TimeoutError = 9003,
    /// Configuration error
    ConfigError = 9004,
    /// Service temporarily unavailable
    ServiceUnavailable = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Student payment
            ErrorCode::PaymentNotFound => "Student payment record not found",
            ErrorCode::PaymentPeriodInvalid => "Billing period is invalid",

            // Teacher payment
            ErrorCode::TeacherPaymentNotFound => "Teacher payment record not found",
            ErrorCode::PayAmountInvalid => "Payout amount is invalid",
            ErrorCode::PayExceedsRemaining => "Payout amount exceeds the remaining balance",
            ErrorCode::TeacherPaymentSettled => "Teacher payment has already been settled",
            ErrorCode::TeacherNotFound => "Teacher not found",

            // Transaction
            ErrorCode::TransactionNotFound => "Transaction not found",
            ErrorCode::TransactionTypeInvalid => "Transaction type is invalid",
            ErrorCode::TransactionDateInvalid => "Transaction date is invalid",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::RequiredField),
            7 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenInvalid),
            1004 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Student payment
            3001 => Ok(ErrorCode::PaymentNotFound),
            3002 => Ok(ErrorCode::PaymentPeriodInvalid),

            // Teacher payment
            4001 => Ok(ErrorCode::TeacherPaymentNotFound),
            4002 => Ok(ErrorCode::PayAmountInvalid),
            4003 => Ok(ErrorCode::PayExceedsRemaining),
            4004 => Ok(ErrorCode::TeacherPaymentSettled),
            4005 => Ok(ErrorCode::TeacherNotFound),

            // Transaction
            5001 => Ok(ErrorCode::TransactionNotFound),
            5002 => Ok(ErrorCode::TransactionTypeInvalid),
            5003 => Ok(ErrorCode::TransactionDateInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::TimeoutError),
            9004 => Ok(ErrorCode::ConfigError),
            9005 => Ok(ErrorCode::ServiceUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
