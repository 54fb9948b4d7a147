//! Binary operator families.
//!
//! Each family parses from its textual tag (`"+"`, `"<="`, `"&&"`...) so that
//! front ends building trees from text reject unknown operators up front.

use std::fmt;
use std::str::FromStr;

use crate::ValidationError;

macro_rules! operator_family {
    (
        $(#[$meta:meta])*
        $name:ident, $family:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ValidationError::InvalidOperator {
                        family: $family,
                        op: other.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

operator_family! {
    /// Integer arithmetic. Division and remainder are signed.
    ArithOp, "arithmetic" {
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Mod => "%",
    }
}

operator_family! {
    /// Signed integer ordering.
    CompareOp, "comparison" {
        Lt => "<",
        Lte => "<=",
        Gt => ">",
        Gte => ">=",
    }
}

operator_family! {
    EqualityOp, "equality" {
        Eq => "==",
        Neq => "!=",
    }
}

operator_family! {
    /// Short-circuiting boolean connectives.
    LogicalOp, "logical" {
        And => "&&",
        Or => "||",
    }
}
