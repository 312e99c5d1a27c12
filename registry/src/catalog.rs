//! Table definitions for the built-in IAM schema.
//!
//! One [`TableDef`] per physical table, columns in physical order. Defaults
//! are SQL literals as they appear in DDL.

use iam_schema_core::{ColumnDef, TableDef, TableDescriptor};

/// Converts the whole catalog into owned descriptors, in catalog order.
pub fn descriptors() -> Vec<TableDescriptor> {
    IAM_TABLES.iter().map(TableDef::to_descriptor).collect()
}

pub static IAM_TABLES: &[TableDef] = &[
    // =========================================================================
    // Events
    // =========================================================================
    TableDef {
        name: "admin_event_entity",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::int8("admin_event_time"),
            ColumnDef::varchar("realm_id", 255),
            ColumnDef::varchar("operation_type", 255),
            ColumnDef::varchar("auth_realm_id", 255),
            ColumnDef::varchar("auth_client_id", 255),
            ColumnDef::varchar("auth_user_id", 255),
            ColumnDef::varchar("ip_address", 255),
            ColumnDef::varchar("resource_path", 2550),
            ColumnDef::text("representation"),
            ColumnDef::varchar("error", 255),
            ColumnDef::varchar("resource_type", 64),
        ],
    },
    TableDef {
        name: "event_entity",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("client_id", 255),
            ColumnDef::varchar("details_json", 2550),
            ColumnDef::varchar("error", 255),
            ColumnDef::varchar("ip_address", 255),
            ColumnDef::varchar("realm_id", 255),
            ColumnDef::varchar("session_id", 255),
            ColumnDef::int8("event_time"),
            ColumnDef::varchar("type", 255),
            ColumnDef::varchar("user_id", 255),
            ColumnDef::text("details_json_long_value"),
        ],
    },
    // =========================================================================
    // Authentication flows
    // =========================================================================
    TableDef {
        name: "authentication_execution",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("alias", 255),
            ColumnDef::varchar("authenticator", 36),
            ColumnDef::varchar("realm_id", 36),
            ColumnDef::varchar("flow_id", 36),
            ColumnDef::int4("requirement"),
            ColumnDef::int4("priority"),
            ColumnDef::boolean("authenticator_flow").required().default("false"),
            ColumnDef::varchar("auth_flow_id", 36),
            ColumnDef::varchar("auth_config", 36),
        ],
    },
    TableDef {
        name: "authentication_flow",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("alias", 255),
            ColumnDef::varchar("description", 255),
            ColumnDef::varchar("realm_id", 36),
            ColumnDef::varchar("provider_id", 36).required().default("'basic-flow'"),
            ColumnDef::boolean("top_level").required().default("false"),
            ColumnDef::boolean("built_in").required().default("false"),
        ],
    },
    TableDef {
        name: "authenticator_config",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("alias", 255),
            ColumnDef::varchar("realm_id", 36),
        ],
    },
    TableDef {
        name: "authenticator_config_entry",
        columns: &[
            ColumnDef::varchar("authenticator_id", 36).key(),
            ColumnDef::text("value"),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
    TableDef {
        name: "required_action_config",
        columns: &[
            ColumnDef::varchar("required_action_id", 36).key(),
            ColumnDef::text("value"),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
    TableDef {
        name: "required_action_provider",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("alias", 255),
            ColumnDef::varchar("name", 255),
            ColumnDef::varchar("realm_id", 36),
            ColumnDef::boolean("enabled").required().default("false"),
            ColumnDef::boolean("default_action").required().default("false"),
            ColumnDef::varchar("provider_id", 255),
            ColumnDef::int4("priority"),
        ],
    },
    // =========================================================================
    // Clients
    // =========================================================================
    TableDef {
        name: "client",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::boolean("enabled").required().default("false"),
            ColumnDef::boolean("full_scope_allowed").required().default("false"),
            ColumnDef::varchar("client_id", 255),
            ColumnDef::int4("not_before"),
            ColumnDef::boolean("public_client").required().default("false"),
            ColumnDef::varchar("secret", 255),
            ColumnDef::varchar("base_url", 255),
            ColumnDef::boolean("bearer_only").required().default("false"),
            ColumnDef::varchar("management_url", 255),
            ColumnDef::boolean("surrogate_auth_required").required().default("false"),
            ColumnDef::varchar("realm_id", 36),
            ColumnDef::varchar("protocol", 255),
            ColumnDef::int4("node_rereg_timeout").default("0"),
            ColumnDef::boolean("frontchannel_logout").required().default("false"),
            ColumnDef::boolean("consent_required").required().default("false"),
            ColumnDef::varchar("name", 255),
            ColumnDef::boolean("service_accounts_enabled").required().default("false"),
            ColumnDef::varchar("client_authenticator_type", 255),
            ColumnDef::varchar("root_url", 255),
            ColumnDef::varchar("description", 255),
            ColumnDef::varchar("registration_token", 255),
            ColumnDef::boolean("standard_flow_enabled").required().default("true"),
            ColumnDef::boolean("implicit_flow_enabled").required().default("false"),
            ColumnDef::boolean("direct_access_grants_enabled").required().default("false"),
            ColumnDef::boolean("always_display_in_console").required().default("false"),
        ],
    },
    TableDef {
        name: "client_attributes",
        columns: &[
            ColumnDef::varchar("client_id", 36).key(),
            ColumnDef::varchar("name", 255).key(),
            ColumnDef::text("value"),
        ],
    },
    TableDef {
        name: "client_auth_flow_bindings",
        columns: &[
            ColumnDef::varchar("client_id", 36).key(),
            ColumnDef::varchar("flow_id", 36),
            ColumnDef::varchar("binding_name", 255).key(),
        ],
    },
    TableDef {
        name: "client_initial_access",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("realm_id", 36).required(),
            ColumnDef::int4("timestamp"),
            ColumnDef::int4("expiration"),
            ColumnDef::int4("count"),
            ColumnDef::int4("remaining_count"),
        ],
    },
    TableDef {
        name: "client_node_registrations",
        columns: &[
            ColumnDef::varchar("client_id", 36).key(),
            ColumnDef::int4("value"),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
    TableDef {
        name: "redirect_uris",
        columns: &[
            ColumnDef::varchar("client_id", 36).key(),
            ColumnDef::varchar("value", 255).key(),
        ],
    },
    TableDef {
        name: "web_origins",
        columns: &[
            ColumnDef::varchar("client_id", 36).key(),
            ColumnDef::varchar("value", 255).key(),
        ],
    },
    TableDef {
        name: "scope_mapping",
        columns: &[
            ColumnDef::varchar("client_id", 36).key(),
            ColumnDef::varchar("role_id", 36).key(),
        ],
    },
    // =========================================================================
    // Client scopes
    // =========================================================================
    TableDef {
        name: "client_scope",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255),
            ColumnDef::varchar("realm_id", 36),
            ColumnDef::varchar("description", 255),
            ColumnDef::varchar("protocol", 255),
        ],
    },
    TableDef {
        name: "client_scope_attributes",
        columns: &[
            ColumnDef::varchar("scope_id", 36).key(),
            ColumnDef::varchar("value", 2048),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
    TableDef {
        name: "client_scope_client",
        columns: &[
            ColumnDef::varchar("client_id", 255).key(),
            ColumnDef::varchar("scope_id", 255).key(),
            ColumnDef::boolean("default_scope").required().default("false"),
        ],
    },
    TableDef {
        name: "client_scope_role_mapping",
        columns: &[
            ColumnDef::varchar("scope_id", 36).key(),
            ColumnDef::varchar("role_id", 36).key(),
        ],
    },
    TableDef {
        name: "default_client_scope",
        columns: &[
            ColumnDef::varchar("realm_id", 36).key(),
            ColumnDef::varchar("scope_id", 36).key(),
            ColumnDef::boolean("default_scope").required().default("false"),
        ],
    },
    // =========================================================================
    // Client sessions
    // =========================================================================
    TableDef {
        name: "client_session",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("client_id", 36),
            ColumnDef::varchar("redirect_uri", 255),
            ColumnDef::varchar("state", 255),
            ColumnDef::int4("timestamp"),
            ColumnDef::varchar("session_id", 36),
            ColumnDef::varchar("auth_method", 255),
            ColumnDef::varchar("realm_id", 255),
            ColumnDef::varchar("auth_user_id", 36),
            ColumnDef::varchar("current_action", 36),
        ],
    },
    TableDef {
        name: "client_session_auth_status",
        columns: &[
            ColumnDef::varchar("authenticator", 36).key(),
            ColumnDef::int4("status"),
            ColumnDef::varchar("client_session", 36).key(),
        ],
    },
    TableDef {
        name: "client_session_note",
        columns: &[
            ColumnDef::varchar("name", 255).key(),
            ColumnDef::varchar("value", 255),
            ColumnDef::varchar("client_session", 36).key(),
        ],
    },
    TableDef {
        name: "client_session_prot_mapper",
        columns: &[
            ColumnDef::varchar("protocol_mapper_id", 36).key(),
            ColumnDef::varchar("client_session", 36).key(),
        ],
    },
    TableDef {
        name: "client_session_role",
        columns: &[
            ColumnDef::varchar("role_id", 255).key(),
            ColumnDef::varchar("client_session", 36).key(),
        ],
    },
    TableDef {
        name: "client_user_session_note",
        columns: &[
            ColumnDef::varchar("name", 255).key(),
            ColumnDef::varchar("value", 2048),
            ColumnDef::varchar("client_session", 36).key(),
        ],
    },
    // =========================================================================
    // Components
    // =========================================================================
    TableDef {
        name: "component",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255),
            ColumnDef::varchar("parent_id", 36),
            ColumnDef::varchar("provider_id", 36),
            ColumnDef::varchar("provider_type", 255),
            ColumnDef::varchar("realm_id", 36),
            ColumnDef::varchar("sub_type", 255),
        ],
    },
    TableDef {
        name: "component_config",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("component_id", 36).required(),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::text("value"),
        ],
    },
    // =========================================================================
    // Credentials
    // =========================================================================
    TableDef {
        name: "credential",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("type", 255),
            ColumnDef::varchar("user_id", 36),
            ColumnDef::int8("created_date"),
            ColumnDef::varchar("user_label", 255),
            ColumnDef::text("secret_data"),
            ColumnDef::text("credential_data"),
            ColumnDef::int4("priority"),
        ],
    },
    // =========================================================================
    // Liquibase bookkeeping
    // =========================================================================
    TableDef {
        name: "databasechangelog",
        columns: &[
            ColumnDef::varchar("id", 255).required(),
            ColumnDef::varchar("author", 255).required(),
            ColumnDef::varchar("filename", 255).required(),
            ColumnDef::timestamp("dateexecuted").required(),
            ColumnDef::int4("orderexecuted").required(),
            ColumnDef::varchar("exectype", 10).required(),
            ColumnDef::varchar("md5sum", 35),
            ColumnDef::varchar("description", 255),
            ColumnDef::varchar("comments", 255),
            ColumnDef::varchar("tag", 255),
            ColumnDef::varchar("liquibase", 20),
            ColumnDef::varchar("contexts", 255),
            ColumnDef::varchar("labels", 255),
            ColumnDef::varchar("deployment_id", 10),
        ],
    },
    TableDef {
        name: "databasechangeloglock",
        columns: &[
            ColumnDef::int4("id").key(),
            ColumnDef::boolean("locked").required(),
            ColumnDef::timestamp("lockgranted"),
            ColumnDef::varchar("lockedby", 255),
        ],
    },
    TableDef {
        name: "migration_model",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("version", 36),
            ColumnDef::int8("update_time").required().default("0"),
        ],
    },
    // =========================================================================
    // User storage federation (federated_* and fed_user_*)
    // =========================================================================
    TableDef {
        name: "fed_user_attribute",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("user_id", 255).required(),
            ColumnDef::varchar("realm_id", 36).required(),
            ColumnDef::varchar("storage_provider_id", 36),
            ColumnDef::varchar("value", 2024),
        ],
    },
    TableDef {
        name: "fed_user_consent",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("client_id", 255),
            ColumnDef::varchar("user_id", 255).required(),
            ColumnDef::varchar("realm_id", 36).required(),
            ColumnDef::varchar("storage_provider_id", 36),
            ColumnDef::int8("created_date"),
            ColumnDef::int8("last_updated_date"),
            ColumnDef::varchar("client_storage_provider", 36),
            ColumnDef::varchar("external_client_id", 255),
        ],
    },
    TableDef {
        name: "fed_user_consent_cl_scope",
        columns: &[
            ColumnDef::varchar("user_consent_id", 36).key(),
            ColumnDef::varchar("scope_id", 36).key(),
        ],
    },
    TableDef {
        name: "fed_user_credential",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("type", 255),
            ColumnDef::int8("created_date"),
            ColumnDef::varchar("user_id", 255).required(),
            ColumnDef::varchar("realm_id", 36).required(),
            ColumnDef::varchar("storage_provider_id", 36),
            ColumnDef::varchar("user_label", 255),
            ColumnDef::text("secret_data"),
            ColumnDef::text("credential_data"),
            ColumnDef::int4("priority"),
        ],
    },
    TableDef {
        name: "fed_user_group_membership",
        columns: &[
            ColumnDef::varchar("group_id", 36).key(),
            ColumnDef::varchar("user_id", 255).key(),
            ColumnDef::varchar("realm_id", 36).required(),
            ColumnDef::varchar("storage_provider_id", 36),
        ],
    },
    TableDef {
        name: "fed_user_required_action",
        columns: &[
            ColumnDef::varchar("required_action", 255).key().default("' '"),
            ColumnDef::varchar("user_id", 255).key(),
            ColumnDef::varchar("realm_id", 36).required(),
            ColumnDef::varchar("storage_provider_id", 36),
        ],
    },
    TableDef {
        name: "fed_user_role_mapping",
        columns: &[
            ColumnDef::varchar("role_id", 36).key(),
            ColumnDef::varchar("user_id", 255).key(),
            ColumnDef::varchar("realm_id", 36).required(),
            ColumnDef::varchar("storage_provider_id", 36),
        ],
    },
    TableDef {
        name: "federated_identity",
        columns: &[
            ColumnDef::varchar("identity_provider", 255).key(),
            ColumnDef::varchar("realm_id", 36),
            ColumnDef::varchar("federated_user_id", 255),
            ColumnDef::varchar("federated_username", 255),
            ColumnDef::text("token"),
            ColumnDef::varchar("user_id", 36).key(),
        ],
    },
    TableDef {
        name: "federated_user",
        columns: &[
            ColumnDef::varchar("id", 255).key(),
            ColumnDef::varchar("storage_provider_id", 255),
            ColumnDef::varchar("realm_id", 36).required(),
        ],
    },
    TableDef {
        name: "broker_link",
        columns: &[
            ColumnDef::varchar("identity_provider", 255).key(),
            ColumnDef::varchar("storage_provider_id", 255),
            ColumnDef::varchar("realm_id", 36).required(),
            ColumnDef::varchar("broker_user_id", 255),
            ColumnDef::varchar("broker_username", 255),
            ColumnDef::text("token"),
            ColumnDef::varchar("user_id", 255).key(),
        ],
    },
    // =========================================================================
    // Groups and roles
    // =========================================================================
    TableDef {
        name: "keycloak_group",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255),
            ColumnDef::varchar("parent_group", 36).required(),
            ColumnDef::varchar("realm_id", 36),
        ],
    },
    TableDef {
        name: "group_attribute",
        columns: &[
            ColumnDef::varchar("id", 36).key().default("'sleep-on-it'"),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("value", 255),
            ColumnDef::varchar("group_id", 36).required(),
        ],
    },
    TableDef {
        name: "group_role_mapping",
        columns: &[
            ColumnDef::varchar("role_id", 36).key(),
            ColumnDef::varchar("group_id", 36).key(),
        ],
    },
    TableDef {
        name: "keycloak_role",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("client_realm_constraint", 255),
            ColumnDef::boolean("client_role").required().default("false"),
            ColumnDef::varchar("description", 255),
            ColumnDef::varchar("name", 255),
            ColumnDef::varchar("realm_id", 255),
            ColumnDef::varchar("client", 36),
            ColumnDef::varchar("realm", 36),
        ],
    },
    TableDef {
        name: "composite_role",
        columns: &[
            ColumnDef::varchar("composite", 36).key(),
            ColumnDef::varchar("child_role", 36).key(),
        ],
    },
    TableDef {
        name: "role_attribute",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("role_id", 36).required(),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("value", 255),
        ],
    },
    // =========================================================================
    // Identity providers
    // =========================================================================
    TableDef {
        name: "identity_provider",
        columns: &[
            ColumnDef::varchar("internal_id", 36).key(),
            ColumnDef::boolean("enabled").required().default("false"),
            ColumnDef::varchar("provider_alias", 255),
            ColumnDef::varchar("provider_id", 255),
            ColumnDef::boolean("store_token").required().default("false"),
            ColumnDef::boolean("authenticate_by_default").required().default("false"),
            ColumnDef::varchar("realm_id", 36),
            ColumnDef::boolean("add_token_role").required().default("true"),
            ColumnDef::boolean("trust_email").required().default("false"),
            ColumnDef::varchar("first_broker_login_flow_id", 36),
            ColumnDef::varchar("post_broker_login_flow_id", 36),
            ColumnDef::varchar("provider_display_name", 255),
            ColumnDef::boolean("link_only").required().default("false"),
        ],
    },
    TableDef {
        name: "identity_provider_config",
        columns: &[
            ColumnDef::varchar("identity_provider_id", 36).key(),
            ColumnDef::text("value"),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
    TableDef {
        name: "identity_provider_mapper",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("idp_alias", 255).required(),
            ColumnDef::varchar("idp_mapper_name", 255).required(),
            ColumnDef::varchar("realm_id", 36).required(),
        ],
    },
    TableDef {
        name: "idp_mapper_config",
        columns: &[
            ColumnDef::varchar("idp_mapper_id", 36).key(),
            ColumnDef::text("value"),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
    // =========================================================================
    // Offline sessions
    // =========================================================================
    TableDef {
        name: "offline_client_session",
        columns: &[
            ColumnDef::varchar("user_session_id", 36).key(),
            ColumnDef::varchar("client_id", 255).key(),
            ColumnDef::varchar("offline_flag", 4).key(),
            ColumnDef::int4("timestamp"),
            ColumnDef::text("data"),
            ColumnDef::varchar("client_storage_provider", 36).key().default("'local'"),
            ColumnDef::varchar("external_client_id", 255).key().default("'local'"),
        ],
    },
    TableDef {
        name: "offline_user_session",
        columns: &[
            ColumnDef::varchar("user_session_id", 36).key(),
            ColumnDef::varchar("user_id", 255).required(),
            ColumnDef::varchar("realm_id", 36).required(),
            ColumnDef::int4("created_on").required(),
            ColumnDef::varchar("offline_flag", 4).key(),
            ColumnDef::text("data"),
            ColumnDef::int4("last_session_refresh").required().default("0"),
        ],
    },
    // =========================================================================
    // Protocol mappers
    // =========================================================================
    TableDef {
        name: "protocol_mapper",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("protocol", 255).required(),
            ColumnDef::varchar("protocol_mapper_name", 255).required(),
            ColumnDef::varchar("client_id", 36),
            ColumnDef::varchar("client_scope_id", 36),
        ],
    },
    TableDef {
        name: "protocol_mapper_config",
        columns: &[
            ColumnDef::varchar("protocol_mapper_id", 36).key(),
            ColumnDef::text("value"),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
    // =========================================================================
    // Realms
    // =========================================================================
    TableDef {
        name: "realm",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::int4("access_code_lifespan"),
            ColumnDef::int4("user_action_lifespan"),
            ColumnDef::int4("access_token_lifespan"),
            ColumnDef::varchar("account_theme", 255),
            ColumnDef::varchar("admin_theme", 255),
            ColumnDef::varchar("email_theme", 255),
            ColumnDef::boolean("enabled").required().default("false"),
            ColumnDef::boolean("events_enabled").required().default("false"),
            ColumnDef::int8("events_expiration"),
            ColumnDef::varchar("login_theme", 255),
            ColumnDef::varchar("name", 255),
            ColumnDef::int4("not_before"),
            ColumnDef::varchar("password_policy", 2550),
            ColumnDef::boolean("registration_allowed").required().default("false"),
            ColumnDef::boolean("remember_me").required().default("false"),
            ColumnDef::boolean("reset_password_allowed").required().default("false"),
            ColumnDef::boolean("social").required().default("false"),
            ColumnDef::varchar("ssl_required", 255),
            ColumnDef::int4("sso_idle_timeout"),
            ColumnDef::int4("sso_max_lifespan"),
            ColumnDef::boolean("update_profile_on_soc_login").required().default("false"),
            ColumnDef::boolean("verify_email").required().default("false"),
            ColumnDef::varchar("master_admin_client", 36),
            ColumnDef::int4("login_lifespan"),
            ColumnDef::boolean("internationalization_enabled").required().default("false"),
            ColumnDef::varchar("default_locale", 255),
            ColumnDef::boolean("reg_email_as_username").required().default("false"),
            ColumnDef::boolean("admin_events_enabled").required().default("false"),
            ColumnDef::boolean("admin_events_details_enabled").required().default("false"),
            ColumnDef::boolean("edit_username_allowed").required().default("false"),
            ColumnDef::int4("otp_policy_counter").default("0"),
            ColumnDef::int4("otp_policy_window").default("1"),
            ColumnDef::int4("otp_policy_period").default("30"),
            ColumnDef::int4("otp_policy_digits").default("6"),
            ColumnDef::varchar("otp_policy_alg", 36).default("'HmacSHA1'"),
            ColumnDef::varchar("otp_policy_type", 36).default("'totp'"),
            ColumnDef::varchar("browser_flow", 36),
            ColumnDef::varchar("registration_flow", 36),
            ColumnDef::varchar("direct_grant_flow", 36),
            ColumnDef::varchar("reset_credentials_flow", 36),
            ColumnDef::varchar("client_auth_flow", 36),
            ColumnDef::int4("offline_session_idle_timeout").default("0"),
            ColumnDef::boolean("revoke_refresh_token").required().default("false"),
            ColumnDef::int4("access_token_life_implicit").default("0"),
            ColumnDef::boolean("login_with_email_allowed").required().default("true"),
            ColumnDef::boolean("duplicate_emails_allowed").required().default("false"),
            ColumnDef::varchar("docker_auth_flow", 36),
            ColumnDef::int4("refresh_token_max_reuse").default("0"),
            ColumnDef::boolean("allow_user_managed_access").required().default("false"),
            ColumnDef::int4("sso_max_lifespan_remember_me").required().default("0"),
            ColumnDef::int4("sso_idle_timeout_remember_me").required().default("0"),
            ColumnDef::varchar("default_role", 255),
        ],
    },
    TableDef {
        name: "realm_attribute",
        columns: &[
            ColumnDef::varchar("name", 255).key(),
            ColumnDef::varchar("realm_id", 36).key(),
            ColumnDef::text("value"),
        ],
    },
    TableDef {
        name: "realm_default_groups",
        columns: &[
            ColumnDef::varchar("realm_id", 36).key(),
            ColumnDef::varchar("group_id", 36).key(),
        ],
    },
    TableDef {
        name: "realm_enabled_event_types",
        columns: &[
            ColumnDef::varchar("realm_id", 36).key(),
            ColumnDef::varchar("value", 255).key(),
        ],
    },
    TableDef {
        name: "realm_events_listeners",
        columns: &[
            ColumnDef::varchar("realm_id", 36).key(),
            ColumnDef::varchar("value", 255).key(),
        ],
    },
    TableDef {
        name: "realm_localizations",
        columns: &[
            ColumnDef::varchar("realm_id", 255).key(),
            ColumnDef::varchar("locale", 255).key(),
            ColumnDef::text("texts").required(),
        ],
    },
    TableDef {
        name: "realm_required_credential",
        columns: &[
            ColumnDef::varchar("type", 255).key(),
            ColumnDef::varchar("form_label", 255),
            ColumnDef::boolean("input").required().default("false"),
            ColumnDef::boolean("secret").required().default("false"),
            ColumnDef::varchar("realm_id", 36).key(),
        ],
    },
    TableDef {
        name: "realm_smtp_config",
        columns: &[
            ColumnDef::varchar("realm_id", 36).key(),
            ColumnDef::varchar("value", 255),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
    TableDef {
        name: "realm_supported_locales",
        columns: &[
            ColumnDef::varchar("realm_id", 36).key(),
            ColumnDef::varchar("value", 255).key(),
        ],
    },
    // =========================================================================
    // Authorization services
    // =========================================================================
    TableDef {
        name: "resource_server",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::boolean("allow_rs_remote_mgmt").required().default("false"),
            ColumnDef::varchar("policy_enforce_mode", 15).required(),
            ColumnDef::int4("decision_strategy").required().default("1"),
        ],
    },
    TableDef {
        name: "resource_server_resource",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("type", 255),
            ColumnDef::varchar("icon_uri", 255),
            ColumnDef::varchar("owner", 255).required(),
            ColumnDef::varchar("resource_server_id", 36).required(),
            ColumnDef::boolean("owner_managed_access").required().default("false"),
            ColumnDef::varchar("display_name", 255),
        ],
    },
    TableDef {
        name: "resource_server_scope",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("icon_uri", 255),
            ColumnDef::varchar("resource_server_id", 36).required(),
            ColumnDef::varchar("display_name", 255),
        ],
    },
    TableDef {
        name: "resource_server_policy",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("description", 255),
            ColumnDef::varchar("type", 255).required(),
            ColumnDef::int4("decision_strategy"),
            ColumnDef::int4("logic"),
            ColumnDef::varchar("resource_server_id", 36).required(),
            ColumnDef::varchar("owner", 255),
        ],
    },
    TableDef {
        name: "resource_server_perm_ticket",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("owner", 255).required(),
            ColumnDef::varchar("requester", 255).required(),
            ColumnDef::int8("created_timestamp").required(),
            ColumnDef::int8("granted_timestamp"),
            ColumnDef::varchar("resource_id", 36).required(),
            ColumnDef::varchar("scope_id", 36),
            ColumnDef::varchar("resource_server_id", 36).required(),
            ColumnDef::varchar("policy_id", 36),
        ],
    },
    TableDef {
        name: "resource_attribute",
        columns: &[
            ColumnDef::varchar("id", 36).key().default("'sleep-on-it'"),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("value", 255),
            ColumnDef::varchar("resource_id", 36).required(),
        ],
    },
    TableDef {
        name: "resource_policy",
        columns: &[
            ColumnDef::varchar("resource_id", 36).key(),
            ColumnDef::varchar("policy_id", 36).key(),
        ],
    },
    TableDef {
        name: "resource_scope",
        columns: &[
            ColumnDef::varchar("resource_id", 36).key(),
            ColumnDef::varchar("scope_id", 36).key(),
        ],
    },
    TableDef {
        name: "resource_uris",
        columns: &[
            ColumnDef::varchar("resource_id", 36).key(),
            ColumnDef::varchar("value", 255).key(),
        ],
    },
    TableDef {
        name: "scope_policy",
        columns: &[
            ColumnDef::varchar("scope_id", 36).key(),
            ColumnDef::varchar("policy_id", 36).key(),
        ],
    },
    TableDef {
        name: "associated_policy",
        columns: &[
            ColumnDef::varchar("policy_id", 36).key(),
            ColumnDef::varchar("associated_policy_id", 36).key(),
        ],
    },
    TableDef {
        name: "policy_config",
        columns: &[
            ColumnDef::varchar("policy_id", 36).key(),
            ColumnDef::varchar("name", 255).key(),
            ColumnDef::text("value"),
        ],
    },
    // =========================================================================
    // Users
    // =========================================================================
    TableDef {
        name: "user_entity",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("email", 255),
            ColumnDef::varchar("email_constraint", 255),
            ColumnDef::boolean("email_verified").required().default("false"),
            ColumnDef::boolean("enabled").required().default("false"),
            ColumnDef::varchar("federation_link", 255),
            ColumnDef::varchar("first_name", 255),
            ColumnDef::varchar("last_name", 255),
            ColumnDef::varchar("realm_id", 255),
            ColumnDef::varchar("username", 255),
            ColumnDef::int8("created_timestamp"),
            ColumnDef::varchar("service_account_client_link", 255),
            ColumnDef::int4("not_before").required().default("0"),
        ],
    },
    TableDef {
        name: "user_attribute",
        columns: &[
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("value", 255),
            ColumnDef::varchar("user_id", 36).required(),
            ColumnDef::varchar("id", 36).key().default("'sleep-on-it'"),
        ],
    },
    TableDef {
        name: "user_consent",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("client_id", 255),
            ColumnDef::varchar("user_id", 36).required(),
            ColumnDef::int8("created_date"),
            ColumnDef::int8("last_updated_date"),
            ColumnDef::varchar("client_storage_provider", 36),
            ColumnDef::varchar("external_client_id", 255),
        ],
    },
    TableDef {
        name: "user_consent_client_scope",
        columns: &[
            ColumnDef::varchar("user_consent_id", 36).key(),
            ColumnDef::varchar("scope_id", 36).key(),
        ],
    },
    TableDef {
        name: "user_group_membership",
        columns: &[
            ColumnDef::varchar("group_id", 36).key(),
            ColumnDef::varchar("user_id", 36).key(),
        ],
    },
    TableDef {
        name: "user_required_action",
        columns: &[
            ColumnDef::varchar("user_id", 36).key(),
            ColumnDef::varchar("required_action", 255).key().default("' '"),
        ],
    },
    TableDef {
        name: "user_role_mapping",
        columns: &[
            ColumnDef::varchar("role_id", 255).key(),
            ColumnDef::varchar("user_id", 36).key(),
        ],
    },
    TableDef {
        name: "username_login_failure",
        columns: &[
            ColumnDef::varchar("realm_id", 36).key(),
            ColumnDef::varchar("username", 255).key(),
            ColumnDef::int4("failed_login_not_before"),
            ColumnDef::int8("last_failure"),
            ColumnDef::varchar("last_ip_failure", 255),
            ColumnDef::int4("num_failures"),
        ],
    },
    // =========================================================================
    // User sessions
    // =========================================================================
    TableDef {
        name: "user_session",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("auth_method", 255),
            ColumnDef::varchar("ip_address", 255),
            ColumnDef::int4("last_session_refresh"),
            ColumnDef::varchar("login_username", 255),
            ColumnDef::varchar("realm_id", 255),
            ColumnDef::boolean("remember_me").required().default("false"),
            ColumnDef::int4("started"),
            ColumnDef::varchar("user_id", 255),
            ColumnDef::int4("user_session_state"),
            ColumnDef::varchar("broker_session_id", 255),
            ColumnDef::varchar("broker_user_id", 255),
        ],
    },
    TableDef {
        name: "user_session_note",
        columns: &[
            ColumnDef::varchar("user_session", 36).key(),
            ColumnDef::varchar("name", 255).key(),
            ColumnDef::varchar("value", 2048),
        ],
    },
    // =========================================================================
    // Legacy user federation providers
    // =========================================================================
    TableDef {
        name: "user_federation_provider",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::int4("changed_sync_period"),
            ColumnDef::varchar("display_name", 255),
            ColumnDef::int4("full_sync_period"),
            ColumnDef::int4("last_sync"),
            ColumnDef::int4("priority"),
            ColumnDef::varchar("provider_name", 255),
            ColumnDef::varchar("realm_id", 36),
        ],
    },
    TableDef {
        name: "user_federation_config",
        columns: &[
            ColumnDef::varchar("user_federation_provider_id", 36).key(),
            ColumnDef::varchar("value", 255),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
    TableDef {
        name: "user_federation_mapper",
        columns: &[
            ColumnDef::varchar("id", 36).key(),
            ColumnDef::varchar("name", 255).required(),
            ColumnDef::varchar("federation_provider_id", 36).required(),
            ColumnDef::varchar("federation_mapper_type", 255).required(),
            ColumnDef::varchar("realm_id", 36).required(),
        ],
    },
    TableDef {
        name: "user_federation_mapper_config",
        columns: &[
            ColumnDef::varchar("user_federation_mapper_id", 36).key(),
            ColumnDef::varchar("value", 255),
            ColumnDef::varchar("name", 255).key(),
        ],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use iam_schema_core::{DatabaseType, validate_table};

    use super::*;

    #[test]
    fn test_catalog_tables_are_valid() {
        for table in descriptors() {
            assert_eq!(validate_table(&table), vec![], "{}", table.name);
        }
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let mut seen = HashSet::new();
        for def in IAM_TABLES {
            assert!(seen.insert(def.name), "duplicate table {}", def.name);
        }
        assert!(IAM_TABLES.len() >= 85);
    }

    #[test]
    fn test_association_tables_have_composite_keys() {
        let tables = descriptors();
        for name in [
            "user_role_mapping",
            "group_role_mapping",
            "client_scope_client",
            "composite_role",
            "user_group_membership",
            "resource_scope",
        ] {
            let table = tables.iter().find(|t| t.name == name).unwrap();
            assert!(table.has_composite_key(), "{name}");
        }
    }

    #[test]
    fn test_catalog_never_auto_increments() {
        assert!(
            descriptors()
                .iter()
                .flat_map(|t| t.columns.iter())
                .all(|c| !c.auto_increment)
        );
    }

    #[test]
    fn test_catalog_uses_every_type() {
        let used: HashSet<DatabaseType> = descriptors()
            .iter()
            .flat_map(|t| t.columns.iter().map(|c| c.database_type))
            .collect();
        for ty in DatabaseType::ALL {
            assert!(used.contains(&ty), "{ty}");
        }
    }
}
