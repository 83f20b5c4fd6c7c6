use sectora_core::error::{Result, SectoraError};
use sectora_core::model::ChatModel;

use crate::openai::OpenAIChatModel;
use crate::provider::{ModelSettings, Provider};

/// Create a ChatModel instance for the given settings.
pub fn create_chat_model(settings: &ModelSettings) -> Result<Box<dyn ChatModel>> {
    match settings.provider {
        Provider::OpenAI => Ok(Box::new(OpenAIChatModel::new(
            settings.api_key.clone(),
            settings.model.clone(),
        ))),
        Provider::AzureOpenAI => {
            let endpoint = settings.endpoint.clone().ok_or_else(|| {
                SectoraError::Other("Azure OpenAI requires an endpoint".into())
            })?;
            let mut model =
                OpenAIChatModel::azure(settings.api_key.clone(), endpoint, settings.model.clone());
            if let Some(version) = &settings.api_version {
                model = model.with_api_version(version.clone());
            }
            Ok(Box::new(model))
        }
    }
}
