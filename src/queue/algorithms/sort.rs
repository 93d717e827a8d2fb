use crate::error::Result;
use crate::list::{Links, NodeId};
use crate::queue::algorithms::find_mid;

/// Sorts the list headed by `ghost` with a stable top-down merge sort.
///
/// One temporary ghost node is allocated per recursion level. If that fails,
/// every element is put back into the list (in unspecified order) and the
/// error is returned.
pub(crate) fn merge_sort<T, F>(links: &mut Links<T>, ghost: NodeId, less: &mut F) -> Result<()>
where
    F: FnMut(&T, &T) -> bool,
{
    if links.is_empty(ghost) || links.is_singular(ghost) {
        return Ok(());
    }
    let mid = find_mid(links, ghost);
    let cut = links.prev(mid);
    let front = links.new_ghost()?;
    // `front` takes the elements before `mid`, `ghost` keeps the rest
    links.cut_at(front, ghost, cut);

    let sorted = match merge_sort(links, front, less) {
        Ok(()) => merge_sort(links, ghost, less),
        Err(err) => Err(err),
    };
    if let Err(err) = sorted {
        links.splice(front, ghost);
        links.release_ghost(front);
        return Err(err);
    }

    merge(links, ghost, front, less);
    links.release_ghost(front);
    Ok(())
}

/// Merges the sorted list `front` into the sorted list `ghost`, where all
/// elements of `front` originally preceded those of `ghost`. After this
/// operation, `front` becomes empty.
///
/// A cursor walks the `ghost` list. It only advances past an element strictly
/// less than the first element of `front`; otherwise the run of `front`
/// elements not greater than the cursor is moved before it. Each comparison
/// either advances the cursor or consumes elements of `front`, so the merge
/// is linear.
fn merge<T, F>(links: &mut Links<T>, ghost: NodeId, front: NodeId, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut cursor = links.next(ghost);
    while !links.is_empty(front) {
        if cursor == ghost {
            links.splice_tail(front, ghost);
            break;
        }
        let run_front = links.next(front);
        if precedes(links, cursor, run_front, less) {
            cursor = links.next(cursor);
            continue;
        }
        let mut run_back = run_front;
        loop {
            let next = links.next(run_back);
            if next == front || precedes(links, cursor, next, less) {
                break;
            }
            run_back = next;
        }
        links.move_range_before(run_front, run_back, cursor);
    }
}

fn precedes<T, F>(links: &Links<T>, a: NodeId, b: NodeId, less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    match (links.element(a), links.element(b)) {
        (Some(a), Some(b)) => less(a, b),
        _ => false,
    }
}
