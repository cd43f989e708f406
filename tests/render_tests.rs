use rand::rngs::mock::StepRng;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use spheretrace::render::to_rgb8;
use spheretrace::scene::example::Example;
use spheretrace::scene::parse_scene;
use spheretrace::{
    render,
    Background,
    Camera,
    Material,
    Point3,
    RenderSettings,
    Scene,
    Sphere,
    Vec3,
};

/// A generator whose every draw is exactly 0.5.
///
/// Pixel jitter lands on pixel centers and unit sphere samples are the origin,
/// so diffuse rays leave along the surface normal.
fn centered_rng() -> StepRng {
    StepRng::new(1 << 63, 0)
}

/// A 2x1 view where the left pixel is centered on the sphere at (0, 0, -1)
/// and the right pixel looks past it.
fn two_pixel_view(background: Background) -> (Scene, Camera, RenderSettings) {
    let mut builder = Scene::builder();
    builder.set_background(background);
    builder.add(Sphere::new(
        Point3::new(0.0, 0.0, -1.0),
        0.5,
        Material::lambertian(Vec3::new(0.1, 0.2, 0.5)),
    ));
    let camera = Camera::builder(90.0, 2.0)
        .from(Point3::new(1.0, 0.0, 0.0))
        .towards(Point3::new(1.0, 0.0, -1.0))
        .build();
    let settings = RenderSettings {
        width: 2,
        height: 1,
        samples_per_pixel: 1,
        max_depth: 1,
    };
    (builder.build(), camera, settings)
}

fn gradient(dir: Vec3) -> Vec3 {
    let t = 0.5 * (dir.unit().y() + 1.0);
    (1.0 - t) * Vec3::new(1.0, 1.0, 1.0) + t * Vec3::new(0.5, 0.7, 1.0)
}

#[test]
fn sphere_pixel_has_albedo_ratios() {
    let (scene, camera, settings) = two_pixel_view(Background::Solid(Vec3::splat(1.0)));
    let image = render(&scene, &camera, &settings, &mut centered_rng());

    assert_eq!((image.width(), image.height()), (2, 1));
    let [r, g, b] = image.get(0, 0);
    assert_eq!([r, g, b], [80, 114, 181]);

    // Undo the gamma encoding.
    let linear = |c: u8| (c as f64 / 255.999).powi(2);
    let (r, g, b) = (linear(r), linear(g), linear(b));
    assert!((g / r / 2.0 - 1.0).abs() < 0.05, "g/r = {}", g / r);
    assert!((b / r / 5.0 - 1.0).abs() < 0.05, "b/r = {}", b / r);

    assert_eq!(image.get(1, 0), [255, 255, 255]);
}

#[test]
fn background_pixel_matches_gradient() {
    let (scene, camera, settings) = two_pixel_view(Background::sky());
    let image = render(&scene, &camera, &settings, &mut centered_rng());

    let ray = camera.get_ray(&mut centered_rng(), 0.75, 0.5);
    assert_eq!(image.get(1, 0), to_rgb8(gradient(ray.dir())));
    assert_eq!(image.get(1, 0), [221, 236, 255]);

    // The diffuse bounce leaves level with the horizon.
    let bounced = Vec3::new(0.1, 0.2, 0.5).mul_pointwise(&gradient(Vec3::new(1.0, 0.0, 1.0)));
    assert_eq!(image.get(0, 0), to_rgb8(bounced));
}

#[test]
fn no_bounces_leaves_surfaces_black() {
    let (scene, camera, mut settings) = two_pixel_view(Background::sky());
    settings.max_depth = 0;
    let image = render(&scene, &camera, &settings, &mut centered_rng());

    assert_eq!(image.get(0, 0), [0, 0, 0]);
    assert_eq!(image.get(1, 0), [221, 236, 255]);
}

#[test]
fn rows_are_emitted_top_first() {
    // Looking at the horizon of an empty scene, the upper row sees more of the sky color.
    let scene = Scene::builder().build();
    let camera = Camera::builder(90.0, 1.0).build();
    let settings = RenderSettings {
        width: 1,
        height: 2,
        samples_per_pixel: 1,
        max_depth: 1,
    };
    let image = render(&scene, &camera, &settings, &mut centered_rng());

    let [top_r, _, _] = image.get(0, 0);
    let [bottom_r, _, _] = image.get(0, 1);
    assert!(top_r < bottom_r, "top {} bottom {}", top_r, bottom_r);
}

#[test]
fn seeded_renders_are_identical() {
    let settings = RenderSettings {
        width: 16,
        height: 8,
        samples_per_pixel: 4,
        max_depth: 50,
    };
    let render_with_seed = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (scene, camera) = Example::Defocus.scene(settings.aspect_ratio(), &mut rng);
        render(&scene, &camera, &settings, &mut rng)
    };

    let first = render_with_seed(7);
    let second = render_with_seed(7);
    assert_eq!(first, second);

    let mut a = Vec::new();
    let mut b = Vec::new();
    first.write_ppm(&mut a).unwrap();
    second.write_ppm(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn renders_scene_file_to_ppm() {
    let yaml = r#"
camera:
  fov: 90
  from: [0, 0, 0]
  towards: [0, 0, -1]
scene:
  surfaces:
    - type: sphere
      position: [0, 0, -1]
      radius: 0.5
      material: { type: metal, albedo: [0.8, 0.6, 0.2], fuzz: 0.0 }
"#;
    let settings = RenderSettings {
        width: 4,
        height: 2,
        samples_per_pixel: 2,
        max_depth: 10,
    };
    let (scene, camera) = parse_scene(yaml, settings.aspect_ratio()).unwrap();
    let image = render(&scene, &camera, &settings, &mut SmallRng::seed_from_u64(1));

    let mut buf = Vec::new();
    image.write_ppm(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(&lines[..3], &["P3", "4 2", "255"]);
    assert_eq!(lines.len(), 3 + 8);
    for line in &lines[3..] {
        let channels = line
            .split(' ')
            .map(|c| c.parse::<u8>().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(channels.len(), 3);
    }
}
