/// Derive the serde instance for newtype struct.
///
/// example:
/// ```ignore
/// pub struct UserID(pub i32);
/// derive_newtype_serde!(UserID, i32);
///
/// // with a fallible constructor, rejecting bad input while deserializing
/// pub struct TweetID(i32);
/// derive_newtype_serde!(TweetID, i32; TweetID::new, "tweet id must be positive");
/// ```
#[macro_export]
macro_rules! derive_newtype_serde {
    ($t1:ty, $t2:ty; $fn:expr, $err_msg:expr) => {
        impl serde::Serialize for $t1 {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $t1 {
            fn deserialize<D>(deserializer: D) -> std::result::Result<$t1, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <$t2 as serde::Deserialize>::deserialize(deserializer)?;
                let ret = $fn(s).map_err(|_| <D::Error as serde::de::Error>::custom($err_msg))?;
                Ok(ret)
            }
        }
    };

    ($t1:tt, $t2:ty) => {
        $crate::derive_newtype_serde!(_aux; $t1, $t2; $t1);
    };

    (_aux; $t1:ty, $t2:ty; $fn:expr) => {
        impl serde::Serialize for $t1 {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $t1 {
            fn deserialize<D>(deserializer: D) -> std::result::Result<$t1, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Ok($fn(<$t2 as serde::Deserialize>::deserialize(deserializer)?))
            }
        }
    };
}
