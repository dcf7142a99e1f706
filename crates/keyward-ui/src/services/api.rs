//! HTTP client helpers (REST).

use crate::core::gateway::{ApproverCommitGateway, CommitError, CommitOutcome, CommitRequest};
use crate::core::logic::{
    build_members_path, build_permissions_path, build_policies_path, build_policy_path, join_url,
};
use crate::models::{
    PermissionRule, PermissionRuleList, ProblemDetails, SecretApprovalPolicy,
    SecretApprovalPolicyEnvelope, SecretApprovalPolicyList, WorkspaceMember, WorkspaceMemberList,
};
use async_trait::async_trait;
use gloo_net::http::{Method, Request, Response};
use uuid::Uuid;

const API_KEY_HEADER: &str = "x-keyward-api-key";

/// REST client shared through context as `Rc<ApiClient>`; equal clients never re-render consumers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiClient {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
        }
    }

    fn request(&self, method: Method, path: &str) -> Request {
        let mut req = Request::new(&join_url(&self.base_url, path)).method(method);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }
        req
    }

    async fn get_json<T: for<'de> serde::Deserialize<'de>>(&self, path: &str) -> anyhow::Result<T> {
        let resp = self.request(Method::GET, path).send().await?;
        if !resp.ok() {
            return Err(anyhow::anyhow!("GET {path} failed with status {}", resp.status()));
        }
        Ok(resp.json::<T>().await?)
    }

    pub(crate) async fn fetch_permissions(
        &self,
        workspace_id: &str,
    ) -> anyhow::Result<Vec<PermissionRule>> {
        let list: PermissionRuleList = self.get_json(&build_permissions_path(workspace_id)).await?;
        Ok(list.rules)
    }

    pub(crate) async fn fetch_policies(
        &self,
        workspace_id: &str,
    ) -> anyhow::Result<Vec<SecretApprovalPolicy>> {
        let list: SecretApprovalPolicyList =
            self.get_json(&build_policies_path(workspace_id)).await?;
        Ok(list.policies)
    }

    pub(crate) async fn fetch_members(
        &self,
        workspace_id: &str,
    ) -> anyhow::Result<Vec<WorkspaceMember>> {
        let list: WorkspaceMemberList = self.get_json(&build_members_path(workspace_id)).await?;
        Ok(list.members)
    }

    pub(crate) async fn delete_policy(
        &self,
        workspace_id: &str,
        policy_id: Uuid,
    ) -> anyhow::Result<()> {
        let path = build_policy_path(workspace_id, policy_id);
        let resp = self.request(Method::DELETE, &path).send().await?;
        if !resp.ok() {
            return Err(anyhow::anyhow!("DELETE {path} failed with status {}", resp.status()));
        }
        Ok(())
    }
}

async fn rejection(resp: Response) -> CommitError {
    let status = resp.status();
    let problem = resp.json::<ProblemDetails>().await.ok();
    CommitError::Rejected { status, problem }
}

#[async_trait(?Send)]
impl ApproverCommitGateway for ApiClient {
    async fn update(&self, request: &CommitRequest) -> CommitOutcome {
        let path = build_policy_path(&request.workspace_id, request.policy_id);
        let req = self
            .request(Method::PATCH, &path)
            .json(&request.to_body())
            .map_err(|err| CommitError::Encode(err.to_string()))?;
        let resp = req
            .send()
            .await
            .map_err(|err| CommitError::Transport(err.to_string()))?;
        if !resp.ok() {
            return Err(rejection(resp).await);
        }
        Ok(())
    }

    async fn refresh(&self, request: &CommitRequest) -> Result<SecretApprovalPolicy, CommitError> {
        let path = build_policy_path(&request.workspace_id, request.policy_id);
        let resp = self
            .request(Method::GET, &path)
            .send()
            .await
            .map_err(|err| CommitError::Transport(err.to_string()))?;
        if !resp.ok() {
            return Err(rejection(resp).await);
        }
        resp.json::<SecretApprovalPolicyEnvelope>()
            .await
            .map(|envelope| envelope.policy)
            .map_err(|err| CommitError::Transport(err.to_string()))
    }
}
