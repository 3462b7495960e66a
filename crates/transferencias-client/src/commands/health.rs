use crate::ClientResult;
use crate::api::TransferApi;
use crate::commands::common::connect;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::HealthData;
use crate::schedule::messages::CONNECTION_ERROR_MESSAGE;

pub fn run(api_url: Option<&str>) -> ClientResult<SuccessEnvelope> {
    let api = connect(api_url)?;
    run_with_api(&api)
}

#[doc(hidden)]
pub fn run_with_api(api: &dyn TransferApi) -> ClientResult<SuccessEnvelope> {
    let health = api
        .health()
        .map_err(|failure| failure.into_client_error(CONNECTION_ERROR_MESSAGE))?;
    let data = HealthData {
        api_url: api.base_url().to_string(),
        health,
    };
    success("health", data)
}
