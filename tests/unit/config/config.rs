use super::*;

const MINIMAL: &str = r#"{
    "input": { "path": "frames" },
    "screen": { "width": 4, "height": 3 },
    "layout": { "origin": [0, 64, 0], "row_offset": -3, "column_offset": 2 },
    "output": { "functions_dir": "out", "function_name": "screen" }
}"#;

fn minimal() -> Config {
    serde_json::from_str(MINIMAL).unwrap()
}

#[test]
fn minimal_config_fills_defaults() {
    let cfg = minimal();
    assert_eq!(cfg.input.fps, 30);
    assert_eq!(cfg.screen.fps_scaling, 1);
    assert_eq!(cfg.screen.start_frame, 0);
    assert_eq!(cfg.screen.finish_frame, None);
    assert!(cfg.output.generate_function);
    assert_eq!(cfg.output.function_ext, ".mcfunction");
    assert_eq!(cfg.output.preview_scale, 1);
    assert_eq!(cfg.palette, Palette::default());
    assert_eq!(cfg.threading, EncodeThreading::default());
    cfg.validate().unwrap();
}

#[test]
fn derived_values() {
    let cfg = minimal();
    assert_eq!(cfg.function_path(), PathBuf::from("out").join("screen.mcfunction"));
    assert_eq!(
        cfg.barrel_layout().pixel_to_world(crate::PixelPos::new(2, 1)),
        WorldPos::new(0, 61, 4)
    );
    assert_eq!(cfg.resolution().unwrap().pixel_count(), 12);
    assert_eq!(cfg.window().fps_scaling, 1);
}

#[test]
fn unknown_fields_are_rejected() {
    let text = MINIMAL.replace("\"height\": 3", "\"height\": 3, \"fps_scale\": 2");
    assert!(serde_json::from_str::<Config>(&text).is_err());
}

#[test]
fn validation_catches_bad_values() {
    let mut cfg = minimal();
    cfg.screen.width = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = minimal();
    cfg.screen.fps_scaling = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = minimal();
    cfg.screen.start_frame = 10;
    cfg.screen.finish_frame = Some(10);
    assert!(cfg.validate().is_err());

    let mut cfg = minimal();
    cfg.palette.on = "white wool".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = minimal();
    cfg.threading.threads = Some(0);
    assert!(cfg.validate().is_err());

    let mut cfg = minimal();
    cfg.output.preview_scale = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn relative_paths_follow_the_config_file() {
    let mut cfg = minimal();
    cfg.output.debug_video = Some(PathBuf::from("debug.avi"));
    cfg.resolve_relative_to(Path::new("/jobs/a"));
    assert_eq!(cfg.input.path, PathBuf::from("/jobs/a/frames"));
    assert_eq!(cfg.output.functions_dir, PathBuf::from("/jobs/a/out"));
    assert_eq!(cfg.output.debug_video, Some(PathBuf::from("/jobs/a/debug.avi")));
}

#[test]
fn example_round_trips_through_json() {
    let example = Config::example();
    example.validate().unwrap();
    let text = serde_json::to_string_pretty(&example).unwrap();
    let back: Config = serde_json::from_str(&text).unwrap();
    assert_eq!(back, example);
}

#[test]
fn load_reports_missing_file() {
    let err = Config::load(Path::new("target/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("read config"));
}
