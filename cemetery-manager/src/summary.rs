//! Startup readiness summary.
use cemetery_repository::{CemeteryRepository, GraveRepository, ManagerError};
use tracing::info;

/// Counts describing the cemetery when the service starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessSummary {
    pub graves: usize,
    pub graves_with_free_space: usize,
    pub unburied_bodies: usize,
}

impl ReadinessSummary {
    /// Queries the repositories for the current counts.
    pub async fn collect(
        graves: &dyn GraveRepository,
        cemetery: &dyn CemeteryRepository,
    ) -> Result<Self, ManagerError> {
        Ok(Self {
            graves: graves.find_all_graves().await?.len(),
            graves_with_free_space: cemetery.find_graves_with_free_space().await?.len(),
            unburied_bodies: cemetery.find_unburied_bodies().await?.len(),
        })
    }

    pub fn log(&self) {
        info!(
            graves = self.graves,
            graves_with_free_space = self.graves_with_free_space,
            unburied_bodies = self.unburied_bodies,
            "Cemetery manager ready"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Dependencies, LogFormat, ManagerConfig};
    use cemetery_shared::types::{Body, Gender, Grave};
    use std::time::Duration;

    async fn make_dependencies() -> Dependencies {
        let config = ManagerConfig {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            busy_timeout: Duration::from_millis(100),
            log_format: LogFormat::Pretty,
        };
        Dependencies::new(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_summary_of_empty_cemetery() {
        let deps = make_dependencies().await;

        let summary = ReadinessSummary::collect(deps.graves.as_ref(), deps.cemetery.as_ref())
            .await
            .unwrap();

        assert_eq!(
            summary,
            ReadinessSummary {
                graves: 0,
                graves_with_free_space: 0,
                unburied_bodies: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_summary_counts_occupancy() {
        let deps = make_dependencies().await;
        let mut full = Grave::new(1, 1, 1);
        let mut roomy = Grave::new(2, 1, 3);
        deps.graves.create_grave(Some(&mut full)).await.unwrap();
        deps.graves.create_grave(Some(&mut roomy)).await.unwrap();

        let mut buried = Body::new("Ann", Gender::Female);
        let mut waiting = Body::new("Bob", Gender::Male);
        deps.bodies.create_body(Some(&mut buried)).await.unwrap();
        deps.bodies.create_body(Some(&mut waiting)).await.unwrap();
        deps.cemetery
            .put_body_into_grave(Some(&buried), Some(&full))
            .await
            .unwrap();

        let summary = ReadinessSummary::collect(deps.graves.as_ref(), deps.cemetery.as_ref())
            .await
            .unwrap();

        assert_eq!(summary.graves, 2);
        assert_eq!(summary.graves_with_free_space, 1);
        assert_eq!(summary.unburied_bodies, 1);
    }
}
