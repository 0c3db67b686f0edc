use std::collections::BTreeMap;

use serde_json::json;
use tracing::{info, warn};

use dermscore_core::collections::{self, TEMPLATES, field};
use dermscore_core::models::template::Template;
use dermscore_storage::{DocumentStore, Query, StorageError, Write};

use crate::error::ServiceError;

/// A template together with its document id.
#[derive(Debug, Clone)]
pub struct StoredTemplate {
    pub id: String,
    pub template: Template,
}

/// The most recently updated template with this slug, if any. Documents
/// without `updatedAt` rank below every dated version.
pub async fn latest_by_slug(
    store: &dyn DocumentStore,
    slug: &str,
) -> Result<Option<StoredTemplate>, ServiceError> {
    let snapshots = store
        .query(TEMPLATES, &Query::new().where_eq(field::SLUG, json!(slug)))
        .await?;

    let mut latest: Option<StoredTemplate> = None;
    for snapshot in snapshots {
        let template: Template = snapshot.decode()?;
        let newer = match &latest {
            None => true,
            Some(current) => template.updated_at > current.template.updated_at,
        };
        if newer {
            latest = Some(StoredTemplate {
                id: snapshot.id,
                template,
            });
        }
    }
    Ok(latest)
}

/// Latest version of every template, ordered by slug.
pub async fn list_latest(store: &dyn DocumentStore) -> Result<Vec<StoredTemplate>, ServiceError> {
    let snapshots = store.query(TEMPLATES, &Query::new()).await?;

    let mut by_slug: BTreeMap<String, StoredTemplate> = BTreeMap::new();
    for snapshot in snapshots {
        let template: Template = match snapshot.decode() {
            Ok(t) => t,
            Err(e) => {
                warn!(template_id = %snapshot.id, error = %e, "skipping unreadable template");
                continue;
            }
        };
        let replace = by_slug
            .get(&template.slug)
            .is_none_or(|current| template.updated_at > current.template.updated_at);
        if replace {
            by_slug.insert(
                template.slug.clone(),
                StoredTemplate {
                    id: snapshot.id,
                    template,
                },
            );
        }
    }
    Ok(by_slug.into_values().collect())
}

/// Create each template version that is not already stored. Returns the
/// number created.
pub async fn seed(
    store: &dyn DocumentStore,
    templates: &[Template],
    now: jiff::Timestamp,
) -> Result<usize, ServiceError> {
    let mut created = 0;
    for template in templates {
        template
            .check()
            .map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;

        let mut template = template.clone();
        template.updated_at.get_or_insert(now);
        let id = collections::template_id(&template.slug, &template.version);

        match store
            .commit(vec![Write::create(TEMPLATES, &id, serde_json::to_value(&template)?)])
            .await
        {
            Ok(()) => created += 1,
            Err(StorageError::PreconditionFailed { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    info!(created, total = templates.len(), "seeded templates");
    Ok(created)
}
