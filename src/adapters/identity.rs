use crate::error::Result;
use crate::http::get_json;
use crate::models::UserInfo;
use crate::DashboardClient;

/// Identity-provider userinfo lookup for the bearer credential's owner.
pub struct IdentityApi<'a> {
    client: &'a DashboardClient,
    token: &'a str,
}

impl<'a> IdentityApi<'a> {
    pub fn new(client: &'a DashboardClient, token: &'a str) -> Self {
        Self { client, token }
    }

    pub async fn user_info(&self) -> Result<UserInfo> {
        get_json(
            self.client.http(),
            &self.client.endpoints().userinfo,
            Some(self.token),
            &[],
        )
        .await
    }
}
