//! The two fixed choreographies played through the sequencer.

use alloc::vec;
use alloc::vec::Vec;

use crate::record::ResultRecord;
use crate::sequencer::Step;

/// Service-startup banner played by `unlock`.
pub fn startup_sequence() -> Vec<Step> {
    vec![
        Step::new(
            450,
            vec![ResultRecord::info(
                "[  OK  ] Started foliod.service - portfolio maintenance daemon.",
            )],
        ),
        Step::new(
            400,
            vec![ResultRecord::info(
                "[  OK  ] Mounted sys/ maintenance volume.",
            )],
        ),
        Step::new(
            400,
            vec![ResultRecord::info(
                "[  OK  ] Enabled admin toolkit: touch, mkdir, chmod, chown.",
            )],
        ),
        Step::new(
            600,
            vec![
                ResultRecord::success("Full feature set unlocked."),
                ResultRecord::info("Run `ls` again - the tree grew."),
            ],
        ),
    ]
}

/// Decoy destruction played by a recursive-force delete; the handler has
/// already printed the opening line. Theatrically convincing, structurally
/// inert: nothing touches the tree.
pub fn decoy_sequence() -> Vec<Step> {
    vec![
        Step::new(500, vec![ResultRecord::info(" 12%  ~/about")]),
        Step::new(350, vec![ResultRecord::info(" 34%  ~/skills")]),
        Step::new(350, vec![ResultRecord::info(" 61%  ~/projects")]),
        Step::new(350, vec![ResultRecord::info(" 89%  ~/contact")]),
        Step::new(
            450,
            vec![ResultRecord::warning("100%  all files deleted.")],
        ),
        Step::new(
            1200,
            vec![
                ResultRecord::success("...just kidding. Nothing was deleted."),
                ResultRecord::info(
                    "This filesystem is a read-only guest in your browser tab; \
                     it cannot be harmed, only explored.",
                ),
                ResultRecord::info("(run `ls` if your heart rate needs the confirmation)"),
            ],
        ),
    ]
}
