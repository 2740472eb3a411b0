use crate::domain::model::DataCategory;
use crate::utils::error::Result;
use async_trait::async_trait;
use lettre::Message;
use std::path::Path;

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self, category: DataCategory) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn report_path(&self) -> &Path;
    fn sender(&self) -> &str;
    fn recipient(&self) -> &str;
}

/// Delivers a fully built message.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, message: Message) -> Result<()>;
}
