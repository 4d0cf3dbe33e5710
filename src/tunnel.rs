//! Travel through tunnel tiles.
//!
//! A tunnel tile lets travellers pass straight through one of its crossings without joining the
//! other passages of the cell. Tunnels can be chained: leaving one tunnel into another continues
//! through the next crossing until an ordinary tile is reached.

use std::collections::HashMap;

use crate::{
    direction::{Direction, Directions},
    grid::Position,
    maze::Maze,
    tile::{Crossing, TileCategory},
};

/// What lies beyond one end of a crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    /// Another tunnel cell.
    Tunnel(Position),
    /// An ordinary tile or a void cell, with the exits it offers.
    Ground {
        /// Position of the cell.
        position: Position,
        /// Exits of the cell, empty for void cells.
        exits: Directions,
    },
}

/// The crossings of one tunnel cell and the cells they lead to.
#[derive(Clone, Debug, PartialEq, Eq)]
struct TunnelCell {
    /// Crossings offered by the tunnel tile.
    crossings: Vec<Crossing>,
    /// The in-grid neighbour on each crossing end.
    links: Vec<(Direction, Link)>,
}

impl TunnelCell {
    /// The crossing end paired with `enter`.
    fn out_direction(&self, enter: Direction) -> Option<Direction> {
        self.crossings
            .iter()
            .find_map(|crossing| crossing.other_end(enter))
    }

    /// The cell beyond the crossing end `direction`.
    fn link(&self, direction: Direction) -> Option<Link> {
        self.links
            .iter()
            .find(|(linked, _)| *linked == direction)
            .map(|(_, link)| *link)
    }
}

/// The result of following a tunnel chain.
#[derive(Debug, Default)]
struct Walk {
    /// Every tunnel cell passed through, in order.
    traversed: Vec<Position>,
    /// The ordinary tile the chain ends on, if it can be entered.
    destination: Option<Position>,
}

/// Links between every tunnel cell of a maze and its neighbours.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TunnelNetwork {
    /// Tunnel cells keyed by position.
    tunnels: HashMap<Position, TunnelCell>,
}

impl TunnelNetwork {
    /// Records, for every tunnel cell of `maze`, the neighbour on each crossing end.
    ///
    /// Crossing ends that point off the grid get no link.
    #[must_use]
    pub fn link(maze: &Maze) -> Self {
        let tunnels = maze
            .cells()
            .filter_map(|(position, _)| {
                let TileCategory::Tunnel(crossings) = &maze.tile(position)?.category else {
                    return None;
                };
                let links = crossings
                    .iter()
                    .flat_map(|crossing| [crossing.0, crossing.1])
                    .filter_map(|direction| {
                        let neighbour = maze.grid().neighbour(position, direction)?;
                        let link = if maze.is_tunnel(neighbour) {
                            Link::Tunnel(neighbour)
                        } else {
                            Link::Ground {
                                position: neighbour,
                                exits: maze.exits(neighbour),
                            }
                        };
                        Some((direction, link))
                    })
                    .collect();
                Some((
                    position,
                    TunnelCell {
                        crossings: crossings.clone(),
                        links,
                    },
                ))
            })
            .collect();

        Self { tunnels }
    }

    /// Number of tunnel cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tunnels.len()
    }

    /// Checks whether the maze holds no tunnel at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tunnels.is_empty()
    }

    /// Checks whether `position` holds a tunnel cell.
    #[must_use]
    pub fn is_tunnel(&self, position: Position) -> bool {
        self.tunnels.contains_key(&position)
    }

    /// The direction a traveller leaves the tunnel at `position` by when entering from `enter`.
    ///
    /// Returns `None` if `position` is not a tunnel or `enter` is not the end of a crossing.
    #[must_use]
    pub fn out_direction(&self, position: Position, enter: Direction) -> Option<Direction> {
        self.tunnels.get(&position)?.out_direction(enter)
    }

    /// The ordinary tile reached by crossing the tunnel at `position` from `enter`.
    ///
    /// `enter` is the side the traveller comes in from: walking up into a tunnel enters it from
    /// [`Direction::Down`]. The destination must expose an exit back towards the last tunnel,
    /// so void cells and walled tiles stop the crossing.
    #[must_use]
    pub fn final_destination(&self, position: Position, enter: Direction) -> Option<Position> {
        self.walk(position, enter).destination
    }

    /// Every tunnel cell passed through from `position`, followed by the destination if the
    /// crossing succeeds.
    #[must_use]
    pub fn crossing_points(&self, position: Position, enter: Direction) -> Vec<Position> {
        let walk = self.walk(position, enter);
        let mut points = walk.traversed;
        points.extend(walk.destination);
        points
    }

    /// Checks whether the tunnel at `position` can be crossed all the way from `enter`.
    #[must_use]
    pub fn can_cross(&self, position: Position, enter: Direction) -> bool {
        self.final_destination(position, enter).is_some()
    }

    /// Follows crossings from tunnel to tunnel until an ordinary tile is reached.
    ///
    /// A chain that comes back on itself is abandoned once it has visited more cells than there
    /// are tunnels.
    fn walk(&self, mut position: Position, mut enter: Direction) -> Walk {
        let mut walk = Walk::default();

        while walk.traversed.len() <= self.tunnels.len() {
            let Some(tunnel) = self.tunnels.get(&position) else {
                break;
            };
            let Some((out, link)) = tunnel
                .out_direction(enter)
                .and_then(|out| Some((out, tunnel.link(out)?)))
            else {
                break;
            };
            walk.traversed.push(position);

            match link {
                Link::Tunnel(next) => {
                    position = next;
                    enter = out.opposite();
                }
                Link::Ground {
                    position: next,
                    exits,
                } => {
                    if exits.opens(out.opposite()) {
                        walk.destination = Some(next);
                    }
                    break;
                }
            }
        }

        walk
    }
}
