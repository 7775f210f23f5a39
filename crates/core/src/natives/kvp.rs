//! Resource key-value storage natives

use fxrs_sdk::natives::*;

natives! {
    pub fn set_resource_kvp(key: &str, value: &str) -> () = SET_RESOURCE_KVP;
    pub fn set_resource_kvp_int(key: &str, value: i32) -> () = SET_RESOURCE_KVP_INT;

    /// `None` when the key is not set
    pub fn get_resource_kvp_string(key: &str) -> Option<String> = GET_RESOURCE_KVP_STRING;
    pub fn get_resource_kvp_int(key: &str) -> i32 = GET_RESOURCE_KVP_INT;

    pub fn delete_resource_kvp(key: &str) -> () = DELETE_RESOURCE_KVP;
}
