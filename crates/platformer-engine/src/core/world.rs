//! One level's simulation session.
//!
//! [`World::update`] runs a single fixed tick in a fixed order:
//!
//! 1. the player's coyote timer counts the tick, then input is applied;
//! 2. every entity advances (platforms, player, enemies, spawners,
//!    projectiles);
//! 3. collisions are resolved against the already-advanced positions;
//! 4. level rules run (fall-out, finish) and spent entities are dropped.
//!
//! Platforms are read-only to everything but their own `update`; the
//! resolver only ever moves the actor it is given.

use glam::Vec2;

use crate::api::game::GameConfig;
use crate::api::types::{EntityId, EventKind, GameEvent, LevelBounds, Rect};
use crate::assets::level::{LevelDescriptor, LevelError};
use crate::assets::registry::SpriteRegistry;
use crate::components::entity::EntityRef;
use crate::core::collision::CollisionResolver;
use crate::core::physics::Integrator;
use crate::entities::enemy::Enemy;
use crate::entities::hazard::HazardEnv;
use crate::entities::platform::Platform;
use crate::entities::player::Player;
use crate::entities::projectile::Projectile;
use crate::entities::spawner::ProjectileSpawner;
use crate::input::sampler::InputSampler;
use crate::renderer::traits::{Color, DrawContext};
use crate::systems;

/// Why the player was sent back to the spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mishap {
    Hit,
    FellOut,
}

pub struct World {
    config: GameConfig,
    integrator: Integrator,
    resolver: CollisionResolver,
    bounds: LevelBounds,
    spawn: Vec2,
    finish: Vec2,
    player: Player,
    platforms: Vec<Platform>,
    enemies: Vec<Enemy>,
    spawners: Vec<ProjectileSpawner>,
    projectiles: Vec<Projectile>,
    events: Vec<GameEvent>,
    next_id: u32,
    completed: bool,
    ticks: u64,
}

impl World {
    /// Build a session from a level. The level is validated first.
    pub fn from_level(level: &LevelDescriptor, config: GameConfig) -> Result<Self, LevelError> {
        level.validate()?;

        let mut next_id = 1;
        let mut alloc = || {
            let id = EntityId(next_id);
            next_id += 1;
            id
        };

        let player = Player::new(alloc(), level.player_spawn, config.player);
        let platforms: Vec<Platform> = level
            .platforms
            .iter()
            .map(|p| Platform::new(alloc(), Vec2::new(p.x, p.y), Vec2::new(p.width, p.height), p.kind))
            .collect();
        let enemies: Vec<Enemy> = level
            .enemies
            .iter()
            .map(|e| {
                Enemy::new(alloc(), Vec2::new(e.x, e.y), e.patrol_distance, &config.enemy)
                    .with_direction(e.direction)
            })
            .collect();
        let spawners: Vec<ProjectileSpawner> = level
            .spawners
            .iter()
            .map(|s| {
                ProjectileSpawner::new(
                    alloc(),
                    Vec2::new(s.x, s.y),
                    s.direction,
                    s.angle,
                    s.speed.unwrap_or(config.projectile.speed),
                    s.interval,
                )
            })
            .collect();

        log::info!(
            "level {:?} loaded: {} platforms, {} enemies, {} spawners",
            level.name,
            platforms.len(),
            enemies.len(),
            spawners.len()
        );

        Ok(Self {
            integrator: Integrator::new(&config.physics),
            resolver: CollisionResolver::new(config.collision),
            bounds: LevelBounds::new(level.width, level.height),
            spawn: level.player_spawn,
            finish: level.finish,
            player,
            platforms,
            enemies,
            spawners,
            projectiles: Vec::with_capacity(32),
            events: Vec::with_capacity(16),
            next_id,
            completed: false,
            ticks: 0,
            config,
        })
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // -- Accessors --

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bounds(&self) -> LevelBounds {
        self.bounds
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn spawners(&self) -> &[ProjectileSpawner] {
        &self.spawners
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Events raised during the most recent tick.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Spawn a projectile outside of any spawner.
    pub fn spawn_projectile(&mut self, position: Vec2, direction: f32, angle: f32, speed: f32) -> EntityId {
        let id = self.alloc_id();
        let projectile = Projectile::new(id, position, direction, angle, speed, &self.config.projectile);
        self.projectiles.push(projectile);
        self.events
            .push(GameEvent::for_entity(EventKind::ProjectileFired, id, position));
        id
    }

    // -- Tick --

    pub fn update(&mut self, dt: f32, input: &InputSampler) {
        self.events.clear();
        self.ticks += 1;

        self.player.advance_grace(dt);
        self.apply_input(dt, input);
        self.advance(dt);
        self.resolve_collisions();
        self.apply_level_rules();

        self.enemies.retain(Enemy::is_alive);
        self.projectiles.retain(Projectile::is_active);
    }

    fn apply_input(&mut self, dt: f32, input: &InputSampler) {
        let axis = input.horizontal_axis();
        if axis < 0.0 {
            self.player.move_left(dt);
        } else if axis > 0.0 {
            self.player.move_right(dt);
        }
        if input.is_jump_just_pressed() && self.player.jump(axis).is_ok() {
            self.events
                .push(GameEvent::for_entity(EventKind::PlayerJumped, self.player.id, self.player.position()));
        }
    }

    fn advance(&mut self, dt: f32) {
        let env = HazardEnv {
            gravity: self.integrator.gravity(),
            level_height: self.bounds.height,
        };
        for platform in &mut self.platforms {
            platform.update(dt, &self.config.hazard, &env);
        }

        self.player.update(dt, &self.integrator);

        for enemy in &mut self.enemies {
            enemy.update(dt, &self.integrator);
        }

        let mut due = Vec::new();
        for (i, spawner) in self.spawners.iter_mut().enumerate() {
            for _ in 0..spawner.update(dt) {
                due.push(i);
            }
        }
        for i in due {
            let id = self.alloc_id();
            let projectile = self.spawners[i].fire(id, &self.config.projectile);
            self.events
                .push(GameEvent::for_entity(EventKind::ProjectileFired, id, projectile.position));
            self.projectiles.push(projectile);
        }

        for projectile in &mut self.projectiles {
            projectile.update(dt, &self.bounds);
        }
    }

    fn resolve_collisions(&mut self) {
        // Player against platforms: horizontal pass, then vertical pass.
        let was_grounded = self.player.is_grounded();
        let resolution = self.resolver.resolve(&mut self.player, &self.platforms);
        let support = resolution.landed_on().or_else(|| {
            if self.player.velocity().y >= 0.0 {
                self.resolver.ground_under(&self.player.bounds(), &self.platforms)
            } else {
                None
            }
        });
        self.player.set_grounded(support.is_some());
        if support.is_some() && !was_grounded {
            self.events
                .push(GameEvent::for_entity(EventKind::PlayerLanded, self.player.id, self.player.position()));
        }
        if let Some(i) = support {
            let platform = &mut self.platforms[i];
            if platform.on_player_contact() {
                self.events
                    .push(GameEvent::for_entity(EventKind::PlatformTriggered, platform.id, platform.position));
            }
        }
        self.player.clamp_x(0.0, self.bounds.width);

        // Enemies only resolve vertically; patrol owns their x.
        for enemy in &mut self.enemies {
            if !enemy.is_alive() {
                continue;
            }
            self.resolver.resolve_vertical(enemy, &self.platforms);
            enemy.check_platform_edge(&self.platforms);
        }

        let tolerance = self.resolver.config().tolerance;
        for projectile in &mut self.projectiles {
            if !projectile.is_active() {
                continue;
            }
            let bounds = projectile.bounds();
            let blocked = self
                .platforms
                .iter()
                .any(|p| p.can_collide() && p.bounds().overlaps(&bounds, tolerance));
            if blocked {
                projectile.hit_platform();
            }
        }

        let player_bounds = self.player.bounds();
        let mut hit = false;
        for projectile in &mut self.projectiles {
            if projectile.bounds().overlaps(&player_bounds, tolerance) && projectile.apply_damage() {
                hit = true;
            }
        }

        for enemy in &mut self.enemies {
            if !enemy.is_alive() {
                continue;
            }
            let enemy_bounds = enemy.bounds();
            if !enemy_bounds.overlaps(&self.player.bounds(), tolerance) {
                continue;
            }
            if is_stomp(&self.player.bounds(), self.player.velocity(), &enemy_bounds) {
                if enemy.eliminate() {
                    self.events
                        .push(GameEvent::for_entity(EventKind::EnemyEliminated, enemy.id, enemy.position()));
                    self.player.bounce();
                }
            } else {
                hit = true;
            }
        }

        if hit {
            self.respawn_player(Mishap::Hit);
        }
    }

    fn apply_level_rules(&mut self) {
        let fall_limit = self.bounds.height + self.config.hazard.destroy_margin;
        if self.player.bounds().top() > fall_limit {
            self.respawn_player(Mishap::FellOut);
        }

        if !self.completed && self.player.bounds().contains_point(self.finish) {
            self.completed = true;
            log::info!("level complete after {} ticks", self.ticks);
            self.events
                .push(GameEvent::for_entity(EventKind::LevelComplete, self.player.id, self.finish));
        }
    }

    fn respawn_player(&mut self, why: Mishap) {
        let at = self.player.position();
        if why == Mishap::Hit {
            self.events
                .push(GameEvent::for_entity(EventKind::PlayerHit, self.player.id, at));
        }
        log::info!(
            "player {:?} at ({:.1}, {:.1}), respawning at ({:.1}, {:.1})",
            why,
            at.x,
            at.y,
            self.spawn.x,
            self.spawn.y
        );
        self.player.respawn(self.spawn);
        self.events
            .push(GameEvent::for_entity(EventKind::PlayerRespawned, self.player.id, self.spawn));
    }

    // -- Output --

    /// Every entity, back to front.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.platforms
            .iter()
            .map(EntityRef::Platform)
            .chain(self.enemies.iter().map(EntityRef::Enemy))
            .chain(self.projectiles.iter().map(EntityRef::Projectile))
            .chain(std::iter::once(EntityRef::Player(&self.player)))
    }

    pub fn render(&self, ctx: &mut dyn DrawContext, sprites: &SpriteRegistry) -> usize {
        systems::render::draw_entities(self.entities(), ctx, sprites, &self.config.hazard)
    }

    pub fn render_debug(&self, ctx: &mut dyn DrawContext) {
        systems::debug::draw_bounds(self.entities(), ctx, 1.0, Color::DEBUG);
        let finish = Rect::new(self.finish.x - 2.0, self.finish.y - 2.0, 4.0, 4.0);
        ctx.fill_rect(finish, Color::WHITE);
    }

    pub fn debug_info(&self) -> String {
        let spawners = self
            .spawners
            .iter()
            .map(ProjectileSpawner::debug_info)
            .collect::<Vec<_>>()
            .join("\n");
        let mut out = format!(
            "tick {} complete={} events={}\n",
            self.ticks,
            self.completed,
            self.events.len()
        );
        out.push_str(&systems::debug::dump(self.entities()));
        if !spawners.is_empty() {
            out.push('\n');
            out.push_str(&spawners);
        }
        out
    }
}

/// A stomp is a falling player whose feet are still in the enemy's upper half.
fn is_stomp(player: &Rect, velocity: Vec2, enemy: &Rect) -> bool {
    velocity.y > 0.0 && player.bottom() <= enemy.top() + enemy.height * 0.5
}
