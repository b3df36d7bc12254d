//! 字符串枚举宏
//!
//! 数据库中枚举统一以 snake_case 字符串存储，JSON 中同样使用字符串。
//! 宏生成 `as_str`/`Display`/`FromStr`/`Serialize`/`Deserialize`，
//! 反序列化失败时给出所有可选值。

#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)*
                    _ => Err(format!("Invalid {}: {s}", $label)),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse::<$name>().map_err(|_| {
                    serde::de::Error::custom(format!(
                        "无效的{}: '{s}'. 支持: {}",
                        $label,
                        [$($value),*].join(", ")
                    ))
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::string_enum! {
        enum Color("color") {
            Red => "red",
            DarkBlue => "dark_blue",
        }
    }

    #[test]
    fn test_round_trip_through_str() {
        assert_eq!("dark_blue".parse::<Color>(), Ok(Color::DarkBlue));
        assert_eq!(Color::Red.to_string(), "red");
        assert!("green".parse::<Color>().is_err());
    }

    #[test]
    fn test_deserialize_error_lists_choices() {
        let err = serde_json::from_str::<Color>("\"green\"").unwrap_err();
        assert!(err.to_string().contains("red, dark_blue"));
    }
}
