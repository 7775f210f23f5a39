//! Resource management natives

use fxrs_sdk::natives::*;

use super::NativeError;

natives! {
    pub fn get_current_resource_name() -> String = GET_CURRENT_RESOURCE_NAME;

    /// One of `missing`, `started`, `starting`, `stopped`, `stopping`,
    /// `uninitialized` or `unknown`
    pub fn get_resource_state(resource: &str) -> String = GET_RESOURCE_STATE;

    pub fn get_num_resources() -> i32 = GET_NUM_RESOURCES;
    pub fn get_resource_by_find_index(index: i32) -> String = GET_RESOURCE_BY_FIND_INDEX;
}

/// Names of every resource the host knows about
pub fn resource_names() -> Result<Vec<String>, NativeError> {
    (0..get_num_resources()?)
        .map(get_resource_by_find_index)
        .collect()
}
