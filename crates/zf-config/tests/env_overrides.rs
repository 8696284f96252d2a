use figment::Jail;
use zf_config::FocusConfig;

#[test]
fn prefixed_env_fills_remote_section() {
    Jail::expect_with(|jail| {
        jail.set_env("ZENFOCUS_REMOTE__ENDPOINT_URL", "https://abc.supabase.co");
        jail.set_env("ZENFOCUS_REMOTE__ACCESS_KEY", "sb_publishable_env");
        jail.set_env("ZENFOCUS_REMOTE__TIMEOUT_SECS", "5");

        let config = FocusConfig::load().expect("config loads");
        assert_eq!(config.remote.endpoint_url, "https://abc.supabase.co");
        assert_eq!(config.remote.access_key, "sb_publishable_env");
        assert_eq!(config.remote.timeout_secs, 5);
        assert!(config.is_configured());
        Ok(())
    });
}

#[test]
fn legacy_supabase_names_are_accepted() {
    Jail::expect_with(|jail| {
        jail.set_env("SUPABASE_URL", "https://legacy.supabase.co");
        jail.set_env("SUPABASE_KEY", "sb_publishable_legacy");

        let config = FocusConfig::load().expect("config loads");
        assert_eq!(config.remote.endpoint_url, "https://legacy.supabase.co");
        assert_eq!(config.remote.access_key, "sb_publishable_legacy");
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_legacy_names() {
    Jail::expect_with(|jail| {
        jail.set_env("SUPABASE_URL", "https://legacy.supabase.co");
        jail.set_env("ZENFOCUS_REMOTE__ENDPOINT_URL", "https://current.supabase.co");

        let config = FocusConfig::load().expect("config loads");
        assert_eq!(config.remote.endpoint_url, "https://current.supabase.co");
        Ok(())
    });
}

#[test]
fn placeholder_env_values_leave_board_unconfigured() {
    Jail::expect_with(|jail| {
        jail.set_env("SUPABASE_URL", "YOUR_SUPABASE_URL_HERE");
        jail.set_env("SUPABASE_KEY", "YOUR_SUPABASE_ANON_KEY_HERE");

        let config = FocusConfig::load().expect("config loads");
        assert!(!config.is_configured());
        Ok(())
    });
}
