//! The built-in service registry for the compositional platform.

use groundwork_types::Result;

use crate::registry::{Catalog, SecretSpec};

impl Catalog {
    /// The fixed catalog of bundled platform services.
    ///
    /// Construction validates the whole registry; a defect here (duplicate
    /// variable, duplicate service id) is reported before any environment
    /// work starts.
    pub fn builtin() -> Result<Self> {
        Catalog::builder()
            .service(
                "database",
                vec![SecretSpec::new("compositional_database_root_password")],
            )
            .service("manager", vec![])
            .service("bitwarden", vec![])
            .service(
                "kanboard",
                vec![SecretSpec::new("compositional_kanboard_backend_password")],
            )
            .service(
                "nextcloud",
                vec![SecretSpec::new("compositional_nextcloud_backend_password")],
            )
            .service(
                "wordpress",
                vec![SecretSpec::new("compositional_wordpress_backend_password")],
            )
            .service(
                "firefly",
                vec![
                    SecretSpec::with_length("compositional_firefly_app_key", 32),
                    SecretSpec::new("compositional_firefly_backend_password"),
                ],
            )
            .service(
                "rundeck",
                vec![SecretSpec::new("compositional_rundeck_backend_password")],
            )
            .service(
                "bookstack",
                vec![SecretSpec::new("compositional_bookstack_backend_password")],
            )
            .build()
    }
}
