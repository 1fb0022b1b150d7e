//! Store enums: movement direction and payment method

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    In,
    Out,
}

impl MovementType {
    /// Signed impact of a movement of `quantity` units on the stock cache.
    pub fn signed_delta(&self, quantity: i64) -> i64 {
        match self {
            MovementType::In => quantity,
            MovementType::Out => -quantity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "IN",
            MovementType::Out => "OUT",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a counter sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Card,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_delta_follows_direction() {
        assert_eq!(MovementType::In.signed_delta(7), 7);
        assert_eq!(MovementType::Out.signed_delta(7), -7);
    }

    #[test]
    fn wire_format_is_screaming_snake() {
        assert_eq!(serde_json::to_string(&MovementType::In).unwrap(), "\"IN\"");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Transfer).unwrap(),
            "\"TRANSFER\""
        );
    }
}
