// Copyright 2025 Cedric Hammes
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// This macro generates a closed code table of the protocol. Every variant carries the numeric code written on the wire and the symbolic
/// name used in configuration. The generated enum converts into its code, from its code and from its symbol. Unknown codes and symbols
/// are rejected with a [ConstructionError](crate::ConstructionError) instead of being passed through.
#[macro_export]
macro_rules! type_enum {
    (
        $(#[$outer:meta])*
        $vis:vis enum $name:ident($T:ty) {
            $(
                $(#[$inner:meta])*
                $value_name:ident = $value:literal => $symbol:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        $vis enum $name {
            $(
                $(#[$inner])*
                $value_name,
            )*
        }

        impl $name {
            /// Returns the code of this value as written on the wire.
            pub const fn code(&self) -> $T {
                match self {
                    $(
                        Self::$value_name => $value,
                    )*
                }
            }

            /// Returns the symbolic name of this value.
            pub const fn symbol(&self) -> &'static str {
                match self {
                    $(
                        Self::$value_name => $symbol,
                    )*
                }
            }
        }

        impl core::convert::TryFrom<$T> for $name {
            type Error = $crate::ConstructionError;

            fn try_from(value: $T) -> Result<Self, Self::Error> {
                match value {
                    $(
                        $value => Ok(Self::$value_name),
                    )*
                    _ => Err($crate::ConstructionError::UnknownCode {
                        field: stringify!($name),
                        code: u32::from(value),
                    })
                }
            }
        }

        impl From<$name> for $T {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::ConstructionError;

            fn from_str(string: &str) -> Result<Self, Self::Err> {
                match string {
                    $(
                        $symbol => Ok(Self::$value_name),
                    )*
                    _ => Err($crate::ConstructionError::unknown_symbol(stringify!($name), string))
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(formatter, "{}", self.symbol())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::ConstructionError;
    use core::str::FromStr;

    type_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Color(u8) {
            Red = 1 => "red",
            Blue = 200 => "blue",
        }
    }

    #[test]
    fn test_code_table() {
        assert_eq!(200, u8::from(Color::Blue));
        assert_eq!(Ok(Color::Red), Color::try_from(1));
        assert_eq!(Ok(Color::Blue), Color::from_str("blue"));
        assert_eq!(
            Err(ConstructionError::UnknownCode { field: "Color", code: 2 }),
            Color::try_from(2)
        );
        assert!(matches!(Color::from_str("green"), Err(ConstructionError::UnknownSymbol { field: "Color", .. })));
    }
}
