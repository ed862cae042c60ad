//! Explosion particles: burst spawning and per-tick decay.
//!
//! Every collision bursts into a fixed-size cloud of particles tinted with
//! the exploding circle's color. Particles drift with a constant velocity
//! and fade linearly; once fully transparent they are despawned. There is
//! no clamping: debris may leave the viewport and finish fading off-screen.

use bevy::prelude::*;
use rand::Rng;

use crate::config::GameConfig;

/// Short-lived debris fragment. Position lives in simulation space; the
/// rendering layer mirrors it into a `Transform` and writes `alpha` into
/// the fragment's material each frame.
#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alpha: f32,
}

impl Particle {
    /// One tick of drift and fade.
    pub fn advance(&mut self, fade: f32) {
        self.pos += self.velocity;
        self.alpha -= fade;
    }
}

/// Burst one explosion at `origin`, tinted with the exploding circle's color.
///
/// Velocities are rolled per axis rather than by angle, so the cloud fills a
/// square rather than a disc. Fragments start fully opaque.
pub fn spawn_explosion(
    commands: &mut Commands,
    rng: &mut impl Rng,
    origin: Vec2,
    color: Color,
    config: &GameConfig,
) {
    for _ in 0..config.explosion_particle_count {
        let velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * config.particle_spread,
            (rng.gen::<f32>() - 0.5) * config.particle_spread,
        );
        let radius = config.particle_radius_min + rng.gen::<f32>() * config.particle_radius_spread;

        commands.spawn(Particle {
            pos: origin,
            velocity,
            radius,
            color,
            alpha: 1.0,
        });
    }
}

/// Fixed-tick step 5: advance every particle and despawn the fully faded.
pub fn particle_decay_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut particles: Query<(Entity, &mut Particle)>,
) {
    for (entity, mut particle) in particles.iter_mut() {
        particle.advance(config.particle_fade_per_tick);
        if particle.alpha <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.add_systems(Update, particle_decay_system);
        app
    }

    fn count_particles(app: &mut App) -> usize {
        app.world_mut()
            .query::<&Particle>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn explosion_bursts_the_configured_count() {
        let mut app = test_app();
        let mut rng = StdRng::seed_from_u64(5);
        let config = GameConfig::default();
        {
            let mut commands = app.world_mut().commands();
            spawn_explosion(
                &mut commands,
                &mut rng,
                Vec2::new(400.0, 300.0),
                Color::srgb_u8(255, 0, 0),
                &config,
            );
        }
        app.world_mut().flush();

        assert_eq!(count_particles(&mut app), 20);
    }

    #[test]
    fn burst_rolls_stay_in_documented_ranges() {
        let mut app = test_app();
        let mut rng = StdRng::seed_from_u64(9);
        let config = GameConfig::default();
        let origin = Vec2::new(123.0, 456.0);
        let tint = Color::srgb_u8(255, 128, 0);
        {
            let mut commands = app.world_mut().commands();
            spawn_explosion(&mut commands, &mut rng, origin, tint, &config);
        }
        app.world_mut().flush();

        let world = app.world_mut();
        for particle in world.query::<&Particle>().iter(world) {
            assert_eq!(particle.pos, origin, "fragments start at the burst site");
            assert!((-4.0..4.0).contains(&particle.velocity.x));
            assert!((-4.0..4.0).contains(&particle.velocity.y));
            assert!((1.0..4.0).contains(&particle.radius));
            assert_eq!(particle.alpha, 1.0);
            assert_eq!(particle.color, tint, "tint inherited from the source");
        }
    }

    #[test]
    fn advance_drifts_and_fades() {
        let mut particle = Particle {
            pos: Vec2::new(10.0, 20.0),
            velocity: Vec2::new(2.0, -1.0),
            radius: 2.0,
            color: Color::srgb_u8(255, 0, 0),
            alpha: 1.0,
        };

        particle.advance(0.02);

        assert_eq!(particle.pos, Vec2::new(12.0, 19.0));
        assert!((particle.alpha - 0.98).abs() < 1e-6);
    }

    /// A fragment whose alpha lands exactly on zero is pruned that same tick.
    #[test]
    fn fade_to_exact_zero_is_pruned() {
        let mut app = test_app();
        let fade = GameConfig::default().particle_fade_per_tick;
        app.world_mut().spawn(Particle {
            pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: 2.0,
            color: Color::srgb_u8(255, 0, 0),
            alpha: fade,
        });

        app.update();

        assert_eq!(count_particles(&mut app), 0);
    }

    #[test]
    fn decay_system_prunes_only_the_fully_faded() {
        let mut app = test_app();
        for alpha in [0.5, 0.03, 0.01] {
            app.world_mut().spawn(Particle {
                pos: Vec2::ZERO,
                velocity: Vec2::ZERO,
                radius: 2.0,
                color: Color::srgb_u8(255, 0, 0),
                alpha,
            });
        }

        app.update();
        assert_eq!(count_particles(&mut app), 2, "0.01 faded out first");

        app.update();
        assert_eq!(count_particles(&mut app), 1, "0.03 followed one tick later");
    }

    /// Debris keeps drifting past the viewport edge; only alpha ends its life.
    #[test]
    fn particles_drift_offscreen_without_clamping() {
        let mut app = test_app();
        app.world_mut().spawn(Particle {
            pos: Vec2::new(5.0, 5.0),
            velocity: Vec2::new(-10.0, -10.0),
            radius: 2.0,
            color: Color::srgb_u8(255, 0, 0),
            alpha: 1.0,
        });

        for _ in 0..10 {
            app.update();
        }

        let world = app.world_mut();
        let particle = world.query::<&Particle>().single(world).unwrap();
        assert_eq!(particle.pos, Vec2::new(-95.0, -95.0));
        assert!(particle.alpha > 0.0);
    }
}
