use std::collections::HashSet;

use crate::error::LayoutError;
use super::overlap::Span;
use super::types::{Appointment, ColumnAssignment, ColumnSlot};

/// Column plan for one layout call, indexed by input position.
#[derive(Debug)]
pub(crate) struct ColumnPlan {
    /// Input indices in processing order (start ascending, input order on ties).
    pub order: Vec<usize>,
    pub slots: Vec<ColumnSlot>,
}

/// Assigns every appointment a column so that overlapping appointments never
/// share one, and gives each overlap cluster its peak concurrency as width.
///
/// Results come back in start-time order; equal start times keep input order.
pub fn assign_columns(appointments: &[Appointment]) -> Result<Vec<ColumnAssignment>, LayoutError> {
    for appointment in appointments {
        appointment.validate()?;
    }
    let plan = plan_columns(appointments);
    Ok(plan
        .order
        .iter()
        .map(|&i| ColumnAssignment {
            id: appointments[i].id.clone(),
            column: plan.slots[i].column,
            total_columns: plan.slots[i].total_columns,
        })
        .collect())
}

/// Expects validated input.
pub(crate) fn plan_columns(appointments: &[Appointment]) -> ColumnPlan {
    let spans: Vec<Span> = appointments.iter().map(Span::of).collect();

    // sort_by_key is stable, which gives the input-order tie-break
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by_key(|&i| spans[i].start);

    let neighbours: Vec<Vec<usize>> = (0..spans.len())
        .map(|i| {
            (0..spans.len())
                .filter(|&j| j != i && spans[i].overlaps(&spans[j]))
                .collect()
        })
        .collect();

    let columns = first_fit(&order, &neighbours);
    let widths = cluster_widths(&order, &neighbours, &columns);

    let slots = columns
        .iter()
        .zip(&widths)
        .map(|(&column, &total_columns)| ColumnSlot { column, total_columns })
        .collect();

    ColumnPlan { order, slots }
}

/// Gives each appointment the lowest column not held by an already placed
/// neighbour.
fn first_fit(order: &[usize], neighbours: &[Vec<usize>]) -> Vec<usize> {
    let mut assigned: Vec<Option<usize>> = vec![None; neighbours.len()];

    for &i in order {
        let used: HashSet<usize> = neighbours[i]
            .iter()
            .filter_map(|&j| assigned[j])
            .collect();

        let mut column = 0;
        while used.contains(&column) {
            column += 1;
        }
        assigned[i] = Some(column);
    }

    assigned.into_iter().map(|c| c.unwrap_or(0)).collect()
}

/// Width of every appointment's cluster: the highest `column + 1` found
/// anywhere in its connected overlap component.
///
/// Because first-fit runs in start order, a column `k` is only handed out
/// when `k` earlier neighbours are all active at that start instant, so this
/// maximum equals the cluster's peak concurrency.
fn cluster_widths(order: &[usize], neighbours: &[Vec<usize>], columns: &[usize]) -> Vec<usize> {
    let mut cluster_of: Vec<Option<usize>> = vec![None; neighbours.len()];
    let mut widths: Vec<usize> = Vec::new();

    for &root in order {
        if cluster_of[root].is_some() {
            continue;
        }
        let cluster = widths.len();
        let mut width = 0;
        let mut stack = vec![root];
        cluster_of[root] = Some(cluster);

        while let Some(i) = stack.pop() {
            width = width.max(columns[i] + 1);
            for &j in &neighbours[i] {
                if cluster_of[j].is_none() {
                    cluster_of[j] = Some(cluster);
                    stack.push(j);
                }
            }
        }
        widths.push(width);
    }

    cluster_of
        .into_iter()
        .map(|cluster| cluster.map_or(1, |c| widths[c]))
        .collect()
}
