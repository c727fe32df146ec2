use pitwall_engine::{ApiFailureKind, ApiKey};
use pitwall_logging::pitwall_warn;

use super::Context;
use crate::error::AppError;
use crate::platform::persistence::CredentialStore;

/// Stores `key` once the backend accepts it. A rejected key also clears any
/// previously stored one.
pub fn login(ctx: &Context, store: &CredentialStore, key: &str) -> Result<(), AppError> {
    let key = ApiKey::new(key).ok_or(AppError::InvalidApiKey)?;
    match ctx.block_on(ctx.api.check_key(&key)) {
        Ok(()) => {
            let path = store.save(&key)?;
            println!("Logged in. Key stored in {}", path.display());
            Ok(())
        }
        Err(err)
            if matches!(
                err.kind,
                ApiFailureKind::Unauthorized | ApiFailureKind::HttpStatus(_)
            ) =>
        {
            pitwall_warn!("Key check rejected: {}", err);
            store.clear()?;
            Err(AppError::InvalidApiKey)
        }
        Err(err) => Err(err.into()),
    }
}

pub fn logout(store: &CredentialStore) -> Result<(), AppError> {
    if store.clear()? {
        println!("Logged out.");
    } else {
        println!("No stored key.");
    }
    Ok(())
}
