use auth::GrantError;
use auth::GrantTokenIssuer;
use auth::GrantTokens;

use crate::domain::oauth::ports::GrantIssuer;

impl GrantIssuer for GrantTokenIssuer {
    fn issue(
        &self,
        client_id: &str,
        scope: &str,
        want_refresh: bool,
    ) -> Result<GrantTokens, GrantError> {
        self.issue_grant(client_id, scope, want_refresh)
    }
}
