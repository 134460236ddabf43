//! 标签管理 API

use reqwest::Method;
use tracing::{info, warn};

use crate::client::SkytapClient;
use crate::error::{Result, SkytapError};
use crate::models::Tag;

/// 标签所属对象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOwner<'a> {
    Configuration(&'a str),
    Template(&'a str),
    Asset(&'a str),
}

impl TagOwner<'_> {
    fn path(&self) -> String {
        match self {
            TagOwner::Configuration(id) => format!("/configurations/{}/tags", id),
            TagOwner::Template(id) => format!("/templates/{}/tags", id),
            TagOwner::Asset(id) => format!("/assets/{}/tags", id),
        }
    }
}

/// 要删除的标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagTarget {
    /// 环境上的全部标签
    All,
    Id(String),
}

impl From<&str> for TagTarget {
    /// `all`（不区分大小写）表示全部标签
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            TagTarget::All
        } else {
            TagTarget::Id(value.to_string())
        }
    }
}

impl From<String> for TagTarget {
    fn from(value: String) -> Self {
        TagTarget::from(value.as_str())
    }
}

/// 标签管理 API
pub struct TagApi<'a> {
    client: &'a SkytapClient,
}

impl<'a> TagApi<'a> {
    /// 创建新的标签 API 实例
    pub(crate) fn new(client: &'a SkytapClient) -> Self {
        Self { client }
    }

    /// 查询标签
    pub async fn list(&self, owner: TagOwner<'_>) -> Result<Vec<Tag>> {
        info!("查询标签: {:?}", owner);
        self.client.request_list(&owner.path()).await
    }

    /// 为环境添加标签
    pub async fn add_to_configuration(&self, config_id: &str, tags: &[String]) -> Result<serde_json::Value> {
        info!("为环境添加标签: {} ({} 个)", config_id, tags.len());
        self.client
            .request(
                Method::POST,
                &TagOwner::Configuration(config_id).path(),
                Some(serde_json::json!({ "tags": tags })),
            )
            .await
    }

    /// 为模板添加标签
    pub async fn add_to_template(&self, template_id: &str, tags: &[String]) -> Result<serde_json::Value> {
        info!("为模板添加标签: {} ({} 个)", template_id, tags.len());
        self.client
            .request(
                Method::POST,
                &TagOwner::Template(template_id).path(),
                Some(serde_json::json!({ "tags": tags })),
            )
            .await
    }

    /// 删除环境标签
    ///
    /// 删除单个标签时失败直接返回错误；删除全部标签时逐个删除，
    /// 某个标签删除失败记为 `None` 并继续删除剩余标签。
    ///
    /// # Example
    /// ```ignore
    /// let results = client.tags().remove("config-1", "all").await?;
    /// ```
    pub async fn remove(
        &self,
        config_id: &str,
        target: impl Into<TagTarget>,
    ) -> Result<Vec<Option<serde_json::Value>>> {
        match target.into() {
            TagTarget::Id(tag_id) => {
                let result = self.remove_one(config_id, &tag_id).await?;
                Ok(vec![Some(result)])
            }
            TagTarget::All => self.remove_all(config_id).await,
        }
    }

    async fn remove_all(&self, config_id: &str) -> Result<Vec<Option<serde_json::Value>>> {
        let tags = self.list(TagOwner::Configuration(config_id)).await?;
        info!("删除环境全部标签: {} ({} 个)", config_id, tags.len());

        let mut results = Vec::with_capacity(tags.len());
        for tag in &tags {
            match self.remove_one(config_id, &tag.id).await {
                Ok(value) => results.push(Some(value)),
                Err(e @ SkytapError::Request { .. }) => {
                    warn!("删除标签失败，继续删除其余标签: {} - {}", tag.id, e);
                    results.push(None);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(results)
    }

    async fn remove_one(&self, config_id: &str, tag_id: &str) -> Result<serde_json::Value> {
        info!("删除标签: {}/{}", config_id, tag_id);
        self.client
            .request(
                Method::DELETE,
                &format!("/configurations/{}/tags/{}", config_id, tag_id),
                None::<()>,
            )
            .await
    }
}
